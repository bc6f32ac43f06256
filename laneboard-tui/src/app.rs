//! Application state for the TUI.

use crossterm::event::{KeyCode, KeyEvent};
use laneboard_core::{ActiveBrush, BrushKind, EventRecord, EventStatus, SessionBoard, ZoomLevel};

/// How many render frames the jump highlight stays lit.
const FLASH_FRAMES: u8 = 8;

/// Current view mode
#[derive(Debug, Clone, Default)]
pub enum ViewMode {
    /// The session board: one lane per session
    #[default]
    Board,
    /// Full event detail for one session
    Detail { session_title: String },
}

/// Expanded popover state, anchored to the selected card.
#[derive(Debug, Clone)]
pub struct PopoverState {
    /// Index of the anchoring event within the focused lane
    pub event_index: usize,
}

/// Main application state.
pub struct App {
    /// The board engine; owns brush and navigation state
    pub board: SessionBoard,
    /// Current view mode
    pub view_mode: ViewMode,
    /// Selected event within the focused lane (board view)
    pub selected_event: usize,
    /// Selected event within the detail view
    pub detail_selected: usize,
    /// Scroll offset for the detail view
    pub detail_scroll: usize,
    /// Expanded popover, when open
    pub popover: Option<PopoverState>,
    /// Transient jump highlight: event id and frames remaining
    pub flash: Option<(String, u8)>,
    /// Days covered by the heatmap strip
    pub heatmap_days: u32,
    /// Heatmap slot width in columns
    pub slot_width: u32,
    /// Minimum axis label gap in columns
    pub min_label_gap: u32,
    /// Session root shown in the empty state
    pub session_root: String,
    /// Lanes that fit the board's lane region, updated each render pass
    pub board_view_rows: usize,
    /// Detail cards that fit the detail view, updated each render pass
    pub detail_view_rows: usize,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App around a loaded board.
    pub fn new(
        board: SessionBoard,
        heatmap_days: u32,
        slot_width: u32,
        min_label_gap: u32,
        session_root: String,
    ) -> Self {
        Self {
            board,
            view_mode: ViewMode::default(),
            selected_event: 0,
            detail_selected: 0,
            detail_scroll: 0,
            popover: None,
            flash: None,
            heatmap_days,
            slot_width,
            min_label_gap,
            session_root,
            board_view_rows: 0,
            detail_view_rows: 0,
            should_quit: false,
        }
    }

    /// Record how many lanes and detail cards fit the current viewport.
    /// The renderer calls this every frame, so key handling one tick later
    /// always works against the geometry that is actually on screen.
    pub fn set_viewport(&mut self, board_rows: usize, detail_rows: usize) {
        self.board_view_rows = board_rows;
        self.detail_view_rows = detail_rows;
    }

    /// Event currently selected in whichever view is active.
    pub fn selected_event_record(&self) -> Option<&EventRecord> {
        let lane = self.board.focused_lane()?;
        let index = match self.view_mode {
            ViewMode::Board => self.selected_event,
            ViewMode::Detail { .. } => self.detail_selected,
        };
        lane.events.get(index)
    }

    /// Tick the transient highlight (call each frame).
    pub fn tick_flash(&mut self) {
        if let Some((_, frames)) = &mut self.flash {
            *frames = frames.saturating_sub(1);
            if *frames == 0 {
                self.flash = None;
            }
        }
    }

    /// True when `event_id` should render flashed.
    pub fn is_flashed(&self, event_id: &str) -> bool {
        self.flash
            .as_ref()
            .is_some_and(|(id, frames)| id == event_id && *frames > 0)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // An open popover captures all input; nothing propagates past it.
        if self.popover.is_some() {
            self.handle_popover_key(key);
            return;
        }
        match self.view_mode {
            ViewMode::Board => self.handle_board_key(key),
            ViewMode::Detail { .. } => self.handle_detail_key(key),
        }
    }

    fn handle_popover_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Char('q')
        ) {
            self.popover = None;
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('z') => {
                self.board.cycle_zoom();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.board.focus_delta(1);
                self.clamp_selected_event();
                self.ensure_focused_lane_visible();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.board.focus_delta(-1);
                self.clamp_selected_event();
                self.ensure_focused_lane_visible();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let max = self.focused_event_count().saturating_sub(1);
                self.selected_event = (self.selected_event + 1).min(max);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_event = self.selected_event.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected_event = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.selected_event = self.focused_event_count().saturating_sub(1);
            }
            KeyCode::Enter => {
                self.open_detail();
            }
            KeyCode::Char(' ') => {
                self.toggle_popover();
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.board.focused_lane().map(|l| l.meta.id.clone()) {
                    self.board.toggle_pin(&id);
                    self.ensure_focused_lane_visible();
                }
            }
            KeyCode::Char('m') => self.brush_from_selected(BrushKind::Model),
            KeyCode::Char('t') => self.brush_from_selected(BrushKind::Tool),
            KeyCode::Char('s') => self.brush_from_selected(BrushKind::Status),
            KeyCode::Char('f') => self.brush_from_selected(BrushKind::File),
            KeyCode::Char('c') | KeyCode::Esc => {
                self.board.clear_brush();
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                self.close_detail();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.focused_event_count().saturating_sub(1);
                self.detail_selected = (self.detail_selected + 1).min(max);
                self.ensure_detail_selection_visible();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail_selected = self.detail_selected.saturating_sub(1);
                self.ensure_detail_selection_visible();
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.detail_selected = 0;
                self.ensure_detail_selection_visible();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.detail_selected = self.focused_event_count().saturating_sub(1);
                self.ensure_detail_selection_visible();
            }
            KeyCode::Char(' ') => {
                self.toggle_popover();
            }
            _ => {}
        }
    }

    fn focused_event_count(&self) -> usize {
        self.board
            .focused_lane()
            .map(|l| l.events.len())
            .unwrap_or(0)
    }

    fn clamp_selected_event(&mut self) {
        let max = self.focused_event_count().saturating_sub(1);
        self.selected_event = self.selected_event.min(max);
    }

    /// Keep the focused lane inside the rendered lane region by driving the
    /// board's scroll offset.
    fn ensure_focused_lane_visible(&mut self) {
        let offset = self.board.scroll_offset();
        let focused = self.board.focused_lane_index();
        if focused < offset {
            self.board.set_scroll_offset(focused);
        } else if self.board_view_rows > 0 && focused >= offset + self.board_view_rows {
            self.board.set_scroll_offset(focused + 1 - self.board_view_rows);
        }
    }

    /// Keep the detail selection inside the visible card window.
    fn ensure_detail_selection_visible(&mut self) {
        if self.detail_selected < self.detail_scroll {
            self.detail_scroll = self.detail_selected;
        } else if self.detail_view_rows > 0
            && self.detail_selected >= self.detail_scroll + self.detail_view_rows
        {
            self.detail_scroll = self.detail_selected + 1 - self.detail_view_rows;
        }
    }

    /// Activate the deep link on the selected card: snapshot the board view,
    /// mount the detail view, then resolve the jump to a scroll-and-flash.
    fn open_detail(&mut self) {
        let Some((event_id, lane_title)) = self.board.focused_lane().and_then(|lane| {
            let event = lane.events.get(self.selected_event)?;
            Some((event.id.clone(), lane.meta.title.clone()))
        }) else {
            return;
        };

        if !self.board.focus_event(&event_id) {
            return;
        }
        self.view_mode = ViewMode::Detail {
            session_title: lane_title,
        };
        self.popover = None;

        // Detail view is mounted; resolve the pending jump against what it
        // actually loaded. An unresolved target leaves scroll at the top.
        self.detail_selected = 0;
        self.detail_scroll = 0;
        if let Some(target) = self.board.resolve_jump() {
            if let Some(index) = self
                .board
                .focused_lane()
                .and_then(|l| l.events.iter().position(|e| e.id == target))
            {
                self.detail_selected = index;
                self.detail_scroll = index;
                self.flash = Some((target, FLASH_FRAMES));
                self.ensure_detail_selection_visible();
            }
        }
    }

    /// Back to the board, restoring the saved view exactly.
    fn close_detail(&mut self) {
        self.popover = None;
        self.flash = None;
        self.board.return_to_board();
        self.view_mode = ViewMode::Board;
    }

    /// Toggle the expanded popover on the selected card. Compact ticks have
    /// no expansion affordance.
    fn toggle_popover(&mut self) {
        if matches!(self.view_mode, ViewMode::Board)
            && self.board.zoom() == ZoomLevel::Compact
        {
            return;
        }
        if self.popover.is_some() {
            self.popover = None;
            return;
        }
        let index = match self.view_mode {
            ViewMode::Board => self.selected_event,
            ViewMode::Detail { .. } => self.detail_selected,
        };
        if index < self.focused_event_count() {
            self.popover = Some(PopoverState { event_index: index });
        }
    }

    /// Set the brush from the selected event's own attributes.
    fn brush_from_selected(&mut self, kind: BrushKind) {
        let Some(event) = self.selected_event_record() else {
            return;
        };
        let value = match kind {
            BrushKind::Model => event.model.clone(),
            BrushKind::Tool => Some(event.render_category().to_string()),
            BrushKind::Status => match event.status {
                EventStatus::Error => Some("error".to_string()),
                EventStatus::Cancelled => Some("cancelled".to_string()),
                EventStatus::Ok if event.made_commit => Some("commit".to_string()),
                EventStatus::Ok => None,
            },
            BrushKind::File => event.touched_files.first().cloned(),
        };
        match value {
            Some(value) => self.board.set_brush(ActiveBrush::new(kind, value)),
            None => self.board.clear_brush(),
        }
    }
}
