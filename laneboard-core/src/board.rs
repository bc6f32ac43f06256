//! Session board composition.
//!
//! One lane per session. The board owns the active brush and the navigation
//! controller; renderers read them but never mutate them directly, so every
//! render pass sees one consistent snapshot of events, brush, and
//! navigation state.

use crate::brush::{self, ActiveBrush};
use crate::density::{self, DensityBucket, TimeWindow};
use crate::labels;
use crate::loader::LoadOutcome;
use crate::navigation::NavigationController;
use crate::types::{BoardView, EventRecord, SessionMeta, ZoomLevel};
use tracing::debug;

/// One session's horizontal track of events.
#[derive(Debug, Clone)]
pub struct SessionLane {
    pub meta: SessionMeta,
    pub events: Vec<EventRecord>,
}

/// Callback invoked whenever the board's navigational state changes, with
/// the focused session id. Lets an outer sidebar stay in sync without
/// polling.
pub type BoardObserver = Box<dyn Fn(&str, &BoardView)>;

/// The board: lanes, view state, brush, and navigation.
pub struct SessionBoard {
    lanes: Vec<SessionLane>,
    view: BoardView,
    brush: Option<ActiveBrush>,
    nav: NavigationController,
    focused_lane: usize,
    skipped_records: usize,
    observer: Option<BoardObserver>,
}

impl SessionBoard {
    /// Build a board from a completed session load.
    pub fn new(outcome: LoadOutcome, default_zoom: ZoomLevel) -> Self {
        let lanes = outcome
            .sessions
            .into_iter()
            .map(|s| SessionLane {
                meta: s.meta,
                events: s.events,
            })
            .collect();

        let mut board = Self {
            lanes,
            view: BoardView {
                zoom: default_zoom,
                ..BoardView::default()
            },
            brush: None,
            nav: NavigationController::new(),
            focused_lane: 0,
            skipped_records: outcome.skipped_records,
            observer: None,
        };
        board.sort_lanes();
        board
    }

    /// Register the `board_state_changed` observer.
    pub fn set_observer(&mut self, observer: BoardObserver) {
        self.observer = Some(observer);
    }

    fn notify(&self) {
        if let (Some(observer), Some(lane)) = (&self.observer, self.lanes.get(self.focused_lane)) {
            observer(&lane.meta.id, &self.view);
        }
    }

    // ----- lanes -----

    pub fn lanes(&self) -> &[SessionLane] {
        &self.lanes
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn focused_lane_index(&self) -> usize {
        self.focused_lane
    }

    pub fn focused_lane(&self) -> Option<&SessionLane> {
        self.lanes.get(self.focused_lane)
    }

    /// Records dropped during load, surfaced in the footer.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    /// Pinned lanes first, then most recent activity first.
    fn sort_lanes(&mut self) {
        let focused_id = self
            .lanes
            .get(self.focused_lane)
            .map(|l| l.meta.id.clone());
        let pinned = self.view.pinned_sessions.clone();
        self.lanes.sort_by(|a, b| {
            let a_pinned = pinned.contains(&a.meta.id);
            let b_pinned = pinned.contains(&b.meta.id);
            b_pinned
                .cmp(&a_pinned)
                .then(b.meta.last_activity.cmp(&a.meta.last_activity))
        });
        if let Some(id) = focused_id {
            if let Some(idx) = self.lanes.iter().position(|l| l.meta.id == id) {
                self.focused_lane = idx;
            }
        }
    }

    // ----- view state -----

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.view.zoom
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.view.zoom = zoom;
        self.notify();
    }

    pub fn cycle_zoom(&mut self) {
        self.view.zoom = self.view.zoom.next();
        self.notify();
    }

    pub fn scroll_offset(&self) -> usize {
        self.view.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.view.scroll_offset = offset;
        self.notify();
    }

    /// Move focus up or down the lane list, clamped to valid lanes.
    pub fn focus_delta(&mut self, delta: isize) {
        if self.lanes.is_empty() {
            return;
        }
        let last = self.lanes.len() - 1;
        let next = self.focused_lane.saturating_add_signed(delta).min(last);
        if next != self.focused_lane {
            self.focused_lane = next;
            self.notify();
        }
    }

    /// Toggle whether `session_id` is pinned to the top of the board.
    pub fn toggle_pin(&mut self, session_id: &str) {
        if !self.view.pinned_sessions.remove(session_id) {
            self.view.pinned_sessions.insert(session_id.to_string());
        }
        self.sort_lanes();
        self.notify();
    }

    // ----- brush -----

    pub fn brush(&self) -> Option<&ActiveBrush> {
        self.brush.as_ref()
    }

    /// Replace the active brush. Setting a new brush replaces the prior one;
    /// this is the only mutation path for brush state.
    pub fn set_brush(&mut self, brush: ActiveBrush) {
        debug!(kind = ?brush.kind, value = %brush.value, "brush set");
        self.brush = Some(brush);
    }

    pub fn clear_brush(&mut self) {
        self.brush = None;
    }

    /// Whether `event` should render de-emphasized under the active brush.
    /// Dimmed events stay present and clickable; brushing never removes
    /// anything from the layout.
    pub fn is_dimmed(&self, event: &EventRecord) -> bool {
        !brush::matches(self.brush.as_ref(), event)
    }

    // ----- density / labels -----

    /// Density buckets over every loaded event.
    pub fn density(&self, window: &TimeWindow) -> Vec<DensityBucket> {
        let events: Vec<EventRecord> = self
            .lanes
            .iter()
            .flat_map(|lane| lane.events.iter().cloned())
            .collect();
        density::aggregate(&events, window)
    }

    /// Density buckets for one lane.
    pub fn lane_density(&self, lane: usize, window: &TimeWindow) -> Vec<DensityBucket> {
        match self.lanes.get(lane) {
            Some(lane) => density::aggregate(&lane.events, window),
            None => Vec::new(),
        }
    }

    /// Axis label indices for a heatmap of `slot_count` slots.
    pub fn label_indices(&self, slot_count: usize, slot_width: u32, min_gap: u32) -> Vec<usize> {
        labels::select_label_indices(slot_count, slot_width, min_gap)
    }

    // ----- navigation -----

    /// Entry point for navigation originating outside the board, e.g. a
    /// sidebar click. Returns false when the session is not loaded.
    pub fn focus_session(&mut self, session_id: &str) -> bool {
        match self.lanes.iter().position(|l| l.meta.id == session_id) {
            Some(idx) => {
                self.focused_lane = idx;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Activate a deep link to `event_id`: snapshot the current view and
    /// hand the target to the navigation controller. Unknown ids are a
    /// no-op.
    pub fn focus_event(&mut self, event_id: &str) -> bool {
        let Some(lane_idx) = self
            .lanes
            .iter()
            .position(|l| l.events.iter().any(|e| e.id == event_id))
        else {
            debug!(event = %event_id, "focus_event for unknown id, ignoring");
            return false;
        };
        self.focused_lane = lane_idx;
        self.nav.begin_jump(event_id, self.view.clone());
        self.notify();
        true
    }

    /// Resolve the pending jump against the focused lane's loaded events.
    /// Returns the event id to scroll to and flash, if it resolved.
    pub fn resolve_jump(&mut self) -> Option<String> {
        let lane = self.lanes.get(self.focused_lane);
        self.nav.resolve_jump(|id| {
            lane.map(|l| l.events.iter().any(|e| e.id == id))
                .unwrap_or(false)
        })
    }

    /// Apply back navigation: restore the saved board view exactly.
    /// Returns false when there is no snapshot to return to.
    pub fn return_to_board(&mut self) -> bool {
        if !self.nav.request_return() {
            return false;
        }
        match self.nav.take_saved_view() {
            Some(view) => {
                self.view = view;
                self.sort_lanes();
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Discard pending navigation, e.g. when switching sessions while a
    /// jump is in flight.
    pub fn cancel_navigation(&mut self) {
        self.nav.cancel();
    }

    pub fn nav(&self) -> &NavigationController {
        &self.nav
    }
}
