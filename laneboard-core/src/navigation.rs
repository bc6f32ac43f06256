//! Deep-link and back-navigation state machine.
//!
//! Jumping from a compact card to full event detail must not cost the user
//! their place on the board. The controller snapshots the board view before
//! leaving, resolves the jump against whatever events the detail view
//! actually loaded, and restores the snapshot exactly on the way back.
//!
//! All brush and navigation mutation funnels through explicit setters here
//! and on the board, so a render pass always observes a consistent snapshot.

use crate::types::BoardView;
use tracing::debug;

/// Navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavState {
    /// No pending target
    #[default]
    Idle,
    /// A deep link was activated; the detail view has not scrolled yet
    PendingJump {
        /// Event to scroll to and highlight
        target_event_id: String,
    },
    /// Back navigation requested; the board has not re-mounted yet
    Returning,
}

/// Owns the deep-link target and the saved board view.
#[derive(Debug, Default)]
pub struct NavigationController {
    state: NavState,
    saved_view: Option<BoardView>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Begin a jump to `target_event_id`, snapshotting the current board
    /// view. A jump activated while another is pending replaces it.
    pub fn begin_jump(&mut self, target_event_id: impl Into<String>, current_view: BoardView) {
        let target_event_id = target_event_id.into();
        debug!(target = %target_event_id, "beginning jump to event");
        self.saved_view = Some(current_view);
        self.state = NavState::PendingJump { target_event_id };
    }

    /// Resolve the pending jump against the ids the detail view loaded.
    ///
    /// Returns the target id when it is present, for the caller to scroll to
    /// and flash. Either way the pending target is consumed and the state
    /// returns to `Idle`; an unresolved target is a silent no-op because the
    /// event may legitimately be gone from a reloaded dataset.
    pub fn resolve_jump<F>(&mut self, is_loaded: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let NavState::PendingJump { target_event_id } = &self.state else {
            return None;
        };
        let target = target_event_id.clone();
        self.state = NavState::Idle;

        if is_loaded(&target) {
            Some(target)
        } else {
            debug!(target = %target, "jump target not in loaded set, ignoring");
            None
        }
    }

    /// Request back navigation. Returns false when there is nothing to
    /// return to.
    pub fn request_return(&mut self) -> bool {
        if self.saved_view.is_none() {
            return false;
        }
        self.state = NavState::Returning;
        true
    }

    /// Consume the saved board view while returning. Clears both the
    /// snapshot and the `Returning` state.
    pub fn take_saved_view(&mut self) -> Option<BoardView> {
        self.state = NavState::Idle;
        self.saved_view.take()
    }

    /// Discard any pending jump without side effects, e.g. when the session
    /// switches or the board closes while a jump is in flight.
    pub fn cancel(&mut self) {
        if self.state != NavState::Idle {
            debug!("cancelling pending navigation");
        }
        self.state = NavState::Idle;
        self.saved_view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ZoomLevel;

    fn view() -> BoardView {
        let mut view = BoardView {
            scroll_offset: 42,
            zoom: ZoomLevel::Summary,
            ..BoardView::default()
        };
        view.pinned_sessions.insert("s2".to_string());
        view
    }

    #[test]
    fn test_jump_and_return_round_trip() {
        let mut nav = NavigationController::new();
        let before = view();

        nav.begin_jump("e7", before.clone());
        assert!(matches!(nav.state(), NavState::PendingJump { .. }));

        let resolved = nav.resolve_jump(|id| id == "e7");
        assert_eq!(resolved.as_deref(), Some("e7"));
        assert_eq!(*nav.state(), NavState::Idle);

        assert!(nav.request_return());
        assert_eq!(*nav.state(), NavState::Returning);
        let restored = nav.take_saved_view().unwrap();
        assert_eq!(restored, before);
        assert_eq!(*nav.state(), NavState::Idle);

        // Snapshot is consumed, nothing left to return to.
        assert!(!nav.request_return());
    }

    #[test]
    fn test_unresolved_target_is_silent_noop() {
        let mut nav = NavigationController::new();
        nav.begin_jump("gone", view());

        let resolved = nav.resolve_jump(|_| false);
        assert!(resolved.is_none());
        assert_eq!(*nav.state(), NavState::Idle);

        // The snapshot survives, so back navigation still works.
        assert!(nav.request_return());
        assert!(nav.take_saved_view().is_some());
    }

    #[test]
    fn test_resolve_without_pending_jump() {
        let mut nav = NavigationController::new();
        assert!(nav.resolve_jump(|_| true).is_none());
        assert_eq!(*nav.state(), NavState::Idle);
    }

    #[test]
    fn test_cancel_discards_pending_state() {
        let mut nav = NavigationController::new();
        nav.begin_jump("e1", view());
        nav.cancel();

        assert_eq!(*nav.state(), NavState::Idle);
        assert!(nav.resolve_jump(|_| true).is_none());
        assert!(!nav.request_return());
    }

    #[test]
    fn test_new_jump_replaces_pending_one() {
        let mut nav = NavigationController::new();
        nav.begin_jump("e1", view());
        nav.begin_jump("e2", view());

        let resolved = nav.resolve_jump(|_| true);
        assert_eq!(resolved.as_deref(), Some("e2"));
    }
}
