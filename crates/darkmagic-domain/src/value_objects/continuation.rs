//! Completion handle for deferred producers

use futures::channel::oneshot;

use super::callable::ProducerOutcome;
use super::value::Value;
use crate::error::Error;
use std::any::Any;

/// Continuation handed to producers that declare a trailing `callback`
///
/// Consumed on use, so a producer completes at most once. It can be moved to
/// another task or thread and completed later.
#[derive(Debug)]
pub struct Continuation {
    producer: String,
    sender: oneshot::Sender<ProducerOutcome>,
}

impl Continuation {
    /// Create a continuation and the receiver the engine awaits
    pub fn channel<S: Into<String>>(producer: S) -> (Self, oneshot::Receiver<ProducerOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                producer: producer.into(),
                sender,
            },
            receiver,
        )
    }

    /// Name of the producer this continuation belongs to
    pub fn producer(&self) -> &str {
        &self.producer
    }

    /// Deliver an outcome
    ///
    /// The outcome is discarded when the resolution that asked for it has
    /// already failed through a sibling.
    pub fn complete(self, outcome: ProducerOutcome) {
        let _ = self.sender.send(outcome);
    }

    /// Deliver a produced value
    pub fn resolve<T: Any + Send + Sync>(self, value: T) {
        self.complete(Ok(Some(Value::new(value))));
    }

    /// Deliver an already wrapped value
    pub fn resolve_value(self, value: Value) {
        self.complete(Ok(Some(value)));
    }

    /// Complete without producing anything
    pub fn resolve_empty(self) {
        self.complete(Ok(None));
    }

    /// Complete with an error
    pub fn fail(self, error: Error) {
        self.complete(Err(error));
    }
}
