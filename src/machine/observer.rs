//! Lifecycle notifications.

use crate::core::LocomotionState;

/// Notified by the machine around every transition.
///
/// For a transition from `A` to `B`, `exited(A)` is always delivered before
/// `entered(B)`. The very first entry has no matching exit.
pub trait StateObserver {
    fn exited(&mut self, _state: LocomotionState) {}

    fn entered(&mut self, _state: LocomotionState) {}
}
