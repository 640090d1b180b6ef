//! Shared state behind every view of a gated instance.

use crate::journal::{Entry, InstanceId, Journal, Op};
use crate::{Bounds, Error, Result};
use parking_lot::Mutex;
use tracing::{debug, trace};

#[derive(Debug)]
struct State {
    value: i64,
    journal: Journal,
}

/// The placeholder domain object the variants wrap.
///
/// Safe operations keep `value` inside `bounds`; unsafe operations do not.
/// The mutex serializes the operations themselves. Gate conversions never
/// touch it, so converting between views is not a synchronization point.
#[derive(Debug)]
pub(crate) struct Core {
    id: InstanceId,
    bounds: Bounds,
    state: Mutex<State>,
}

impl Core {
    pub(crate) fn new(bounds: Bounds) -> Self {
        let id = InstanceId::new();
        debug!(instance = %id, %bounds, "gated instance created");
        Self {
            id,
            bounds,
            state: Mutex::new(State {
                value: bounds.min(),
                journal: Journal::new(),
            }),
        }
    }

    pub(crate) fn id(&self) -> InstanceId {
        self.id
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn value(&self) -> i64 {
        self.state.lock().value
    }

    pub(crate) fn journal(&self) -> Vec<Entry> {
        self.state.lock().journal.entries().to_vec()
    }

    /// Saturating add clamped into bounds.
    pub(crate) fn safely(&self, amount: i64) {
        let mut state = self.state.lock();
        let value = self.bounds.clamp(state.value.saturating_add(amount));
        state.value = value;
        let seq = state.journal.record(Op::Safely { amount }, value);
        trace!(instance = %self.id, seq, amount, value, "safely");
    }

    /// Unchecked overwrite.
    pub(crate) fn unsafely(&self, raw: i64) {
        let mut state = self.state.lock();
        state.value = raw;
        let seq = state.journal.record(Op::Unsafely { raw }, raw);
        trace!(instance = %self.id, seq, raw, "unsafely");
    }

    /// Fails when the current value breaks the safe invariant.
    pub(crate) fn check(&self) -> Result<()> {
        let value = self.value();
        if self.bounds.contains(value) {
            Ok(())
        } else {
            Err(Error::NotSafeRepresentable {
                value,
                bounds: self.bounds,
            })
        }
    }

    pub(crate) fn crossed(&self, gate: &'static str) {
        debug!(instance = %self.id, gate, "capability gate crossed");
    }
}
