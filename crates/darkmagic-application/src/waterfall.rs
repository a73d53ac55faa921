//! Ordered completion barrier
//!
//! Collects a fixed number of completions that may arrive in any order and
//! fires its callback exactly once: with every slot filled in request order,
//! or with the first error.

use std::fmt;

use tracing::trace;

type OnFire<T, E> = Box<dyn FnOnce(Result<Vec<T>, E>) + Send>;

enum State<T, E> {
    Pending {
        remaining: usize,
        slots: Vec<Option<T>>,
        on_fire: OnFire<T, E>,
    },
    Fired,
}

/// Barrier with state `Pending(n)` → `Fired`
pub struct Waterfall<T, E> {
    state: State<T, E>,
}

impl<T, E> Waterfall<T, E> {
    /// Barrier waiting for `participants` completions
    ///
    /// With zero participants the callback fires before this returns.
    pub fn new<F>(participants: usize, on_fire: F) -> Self
    where
        F: FnOnce(Result<Vec<T>, E>) + Send + 'static,
    {
        if participants == 0 {
            trace!("barrier has no participants, firing immediately");
            on_fire(Ok(Vec::new()));
            return Self {
                state: State::Fired,
            };
        }

        Self {
            state: State::Pending {
                remaining: participants,
                slots: std::iter::repeat_with(|| None).take(participants).collect(),
                on_fire: Box::new(on_fire),
            },
        }
    }

    /// Record the outcome for slot `index`
    ///
    /// Returns `true` when this completion fired the barrier. Completions
    /// after firing, repeated completions of one slot and out-of-range
    /// indices are ignored.
    pub fn complete(&mut self, index: usize, outcome: Result<T, E>) -> bool {
        let State::Pending {
            remaining, slots, ..
        } = &mut self.state
        else {
            trace!(index, ok = outcome.is_ok(), "barrier already fired, ignoring completion");
            return false;
        };

        match outcome {
            Err(error) => {
                trace!(index, "barrier slot failed, firing with error");
                self.fire(Err(error));
                true
            }
            Ok(value) => {
                let Some(slot) = slots.get_mut(index) else {
                    trace!(index, "completion for unknown barrier slot ignored");
                    return false;
                };
                if slot.is_some() {
                    trace!(index, "barrier slot completed twice, ignoring");
                    return false;
                }
                *slot = Some(value);
                *remaining -= 1;
                trace!(index, remaining = *remaining, "barrier slot filled");

                if *remaining == 0 {
                    self.fire_filled();
                    return true;
                }
                false
            }
        }
    }

    /// Whether the callback has run
    pub fn is_fired(&self) -> bool {
        matches!(self.state, State::Fired)
    }

    /// Completions still awaited
    pub fn remaining(&self) -> usize {
        match &self.state {
            State::Pending { remaining, .. } => *remaining,
            State::Fired => 0,
        }
    }

    fn fire_filled(&mut self) {
        if let State::Pending { slots, on_fire, .. } =
            std::mem::replace(&mut self.state, State::Fired)
        {
            on_fire(Ok(slots.into_iter().flatten().collect()));
        }
    }

    fn fire(&mut self, outcome: Result<Vec<T>, E>) {
        if let State::Pending { on_fire, .. } = std::mem::replace(&mut self.state, State::Fired) {
            on_fire(outcome);
        }
    }
}

impl<T, E> fmt::Debug for Waterfall<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Pending { remaining, .. } => write!(f, "Waterfall::Pending({remaining})"),
            State::Fired => f.write_str("Waterfall::Fired"),
        }
    }
}
