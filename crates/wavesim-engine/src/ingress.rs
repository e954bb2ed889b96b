//! Impulse ingress: a bounded queue between input handlers and the frame.
//!
//! Hosts often receive input on a different callback (or thread) than the
//! one that steps the simulation. [`InputSender`] lets those callbacks queue
//! impulses; [`Controller::advance_frame`](crate::Controller::advance_frame)
//! drains the queue in submission order and applies every impulse before
//! that frame's step, so inputs are never interleaved with a step.

use std::error::Error;
use std::fmt;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use smallvec::SmallVec;
use wavesim_core::{FieldError, Impulse};

/// Impulses drained for one frame. Inline storage covers typical input rates.
pub(crate) type Drained = SmallVec<[Impulse; 16]>;

/// Why an impulse could not be queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngressError {
    /// The queue holds `max_pending_impulses` items already.
    QueueFull,
    /// The controller owning the queue has been dropped.
    Disconnected,
}

impl fmt::Display for IngressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "impulse queue full"),
            Self::Disconnected => write!(f, "controller dropped"),
        }
    }
}

impl Error for IngressError {}

/// Outcome of one queued impulse, reported by `advance_frame`.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    /// The impulse as submitted.
    pub impulse: Impulse,
    /// Whether it was applied to the field.
    pub accepted: bool,
    /// Why it was rejected, if it was.
    pub reason: Option<FieldError>,
}

impl Receipt {
    pub(crate) fn from_result(impulse: Impulse, result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Self {
                impulse,
                accepted: true,
                reason: None,
            },
            Err(e) => Self {
                impulse,
                accepted: false,
                reason: Some(e),
            },
        }
    }
}

/// Cloneable, `Send` handle for queuing impulses.
#[derive(Clone, Debug)]
pub struct InputSender {
    tx: Sender<Impulse>,
}

impl InputSender {
    /// Queue an impulse for the next frame.
    ///
    /// Never blocks: a full queue is reported as
    /// [`IngressError::QueueFull`] and the impulse is dropped.
    pub fn submit(&self, impulse: Impulse) -> Result<(), IngressError> {
        self.tx.try_send(impulse).map_err(|e| match e {
            TrySendError::Full(_) => IngressError::QueueFull,
            TrySendError::Disconnected(_) => IngressError::Disconnected,
        })
    }
}

/// Controller-side end of the queue.
#[derive(Debug)]
pub(crate) struct ImpulseQueue {
    tx: Sender<Impulse>,
    rx: Receiver<Impulse>,
    capacity: usize,
}

impl ImpulseQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self { tx, rx, capacity }
    }

    pub(crate) fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Take everything queued so far, oldest first.
    ///
    /// Bounded by capacity so a producer that keeps submitting cannot stall
    /// the frame; anything beyond waits for the next drain.
    pub(crate) fn drain(&self) -> Drained {
        self.rx.try_iter().take(self.capacity).collect()
    }

    pub(crate) fn clear(&self) {
        while self.rx.try_recv().is_ok() {}
    }

    pub(crate) fn len(&self) -> usize {
        self.rx.len()
    }
}
