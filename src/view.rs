use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counter shared between a view and whoever may tear it down.
///
/// A view captures an [`Activation`] before each suspend point and only applies the
/// completion if the generation has not moved in the meantime.
#[derive(Clone, Debug, Default)]
pub struct ViewLifecycle {
    generation: Arc<AtomicU64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activation(u64);

/// How a load or write ended, as seen by the view that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    /// The view was torn down before the completion arrived; nothing was touched.
    Stale,
}

impl ViewLifecycle {
    pub fn current(&self) -> Activation {
        Activation(self.generation.load(Ordering::Acquire))
    }

    pub fn is_current(&self, activation: Activation) -> bool {
        self.current() == activation
    }

    pub fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teardown_invalidates_activation() {
        let lifecycle = ViewLifecycle::default();
        let activation = lifecycle.current();
        assert!(lifecycle.is_current(activation));

        let handle = lifecycle.clone();
        handle.teardown();
        assert!(!lifecycle.is_current(activation));
        assert!(lifecycle.is_current(lifecycle.current()));
    }
}
