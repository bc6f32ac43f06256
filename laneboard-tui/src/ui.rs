//! UI rendering for the TUI.
//!
//! Every frame re-renders from one consistent snapshot of board state:
//! density buckets and label indices are recomputed from the engine, brush
//! dimming is applied per event, and the popover rectangle is derived fresh
//! from the anchoring card so it never drifts on resize.

use chrono::Utc;
use laneboard_core::density::TimeWindow;
use laneboard_core::{
    format, tick_height, BrushKind, DensityBucket, EventRecord, EventStatus, Role, SessionLane,
    ToolKind, ZoomLevel,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, ViewMode};

// ========== Board Colors ==========

/// User turn ticks and labels
const ROLE_USER: Color = Color::Rgb(0, 180, 180);
/// Assistant turn ticks and labels
const ROLE_ASSISTANT: Color = Color::Rgb(80, 160, 80);
/// File-op and file-edit emphasis
const TOOL_FILE: Color = Color::Rgb(180, 100, 180);
/// Search tools
const TOOL_SEARCH: Color = Color::Rgb(100, 140, 220);
/// Shell tools
const TOOL_SHELL: Color = Color::Rgb(220, 180, 0);
/// Git and commit markers
const TOOL_GIT: Color = Color::Rgb(255, 127, 80);
/// Web tools
const TOOL_WEB: Color = Color::Rgb(0, 255, 255);
/// Task / sub-agent tools
const TOOL_TASK: Color = Color::Rgb(138, 43, 226);
/// Errors always win the precedence fight
const STATUS_ERROR: Color = Color::Rgb(220, 60, 60);
/// De-emphasized (brushed-out) events
const DIMMED: Color = Color::Rgb(90, 90, 90);
/// Jump highlight flash
const FLASH: Color = Color::Rgb(255, 215, 0);
/// Separator and border chrome
const CHROME: Color = Color::Rgb(60, 60, 60);
/// Heatmap intensity ramp, lowest to highest
const HEAT_RAMP: [Color; 5] = [
    Color::Rgb(35, 35, 35),
    Color::Rgb(0, 70, 70),
    Color::Rgb(0, 110, 110),
    Color::Rgb(0, 150, 150),
    Color::Rgb(0, 210, 210),
];

/// Horizontal gap between a card and its popover
const POPOVER_GAP: u16 = 2;
/// The popover never renders above this row of the viewport
const POPOVER_TOP_MARGIN: u16 = 1;
/// Rows per multi-line detail card
const DETAIL_CARD_ROWS: u16 = 3;

/// Lane height in rows for each zoom level (title row included).
fn lane_height(zoom: ZoomLevel) -> u16 {
    match zoom {
        ZoomLevel::Compact => 2,
        ZoomLevel::Summary => 4,
        ZoomLevel::Detail => 7,
    }
}

/// Lanes that fit the board's lane region at the given terminal height.
fn board_lane_capacity(total_height: u16, zoom: ZoomLevel) -> usize {
    // Header, heatmap strip, and footer surround the lane region.
    let chrome = 1 + 3 + 1;
    (total_height.saturating_sub(chrome) / lane_height(zoom)) as usize
}

/// Detail cards that fit the detail view at the given terminal height.
fn detail_card_capacity(total_height: u16) -> usize {
    (total_height.saturating_sub(2) / DETAIL_CARD_ROWS) as usize
}

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    // Publish the current viewport capacities so key handling keeps the
    // selection and the scroll window in sync.
    app.set_viewport(
        board_lane_capacity(area.height, app.board.zoom()),
        detail_card_capacity(area.height),
    );
    let app = &*app;

    let anchor = match &app.view_mode {
        ViewMode::Board => render_board(frame, app),
        ViewMode::Detail { session_title, .. } => {
            render_detail_view(frame, app, session_title.clone())
        }
    };

    if let (Some(popover), Some(anchor)) = (&app.popover, anchor) {
        render_popover(frame, app, popover.event_index, anchor);
    }
}

/// Render the board. Returns the selected card's rectangle so the popover
/// can anchor to it.
fn render_board(frame: &mut Frame, app: &App) -> Option<Rect> {
    let area = frame.area();

    if app.board.is_empty() {
        render_empty_state(frame, app, area);
        return None;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Heatmap strip + axis labels
        Constraint::Min(3),    // Lanes
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_heatmap(frame, app, chunks[1]);
    let anchor = render_lanes(frame, app, chunks[2]);
    render_board_footer(frame, app, chunks[3]);
    anchor
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No sessions found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Looked under {}", app.session_root),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Press q to quit",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let lane_count = app.board.lanes().len();
    let title = format!(
        " laneboard - {} session{} - zoom: {} ",
        lane_count,
        if lane_count == 1 { "" } else { "s" },
        app.board.zoom().label(),
    );
    let header = Paragraph::new(title).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(30, 30, 30))
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(header, area);
}

/// Render the density strip and its collision-free axis labels.
fn render_heatmap(frame: &mut Frame, app: &App, area: Rect) {
    if area.height < 2 || area.width == 0 {
        return;
    }
    let slot_width = app.slot_width.max(1);
    let max_slots = (area.width as u32 / slot_width) as usize;
    let days = (app.heatmap_days as usize).min(max_slots).max(1);

    let window = TimeWindow::trailing_days(Utc::now().date_naive(), days as u32);
    let buckets = app.board.density(&window);
    if buckets.is_empty() {
        return;
    }

    let strip_y = area.y;
    let labels_y = area.y + 1;

    let mut strip_spans: Vec<Span> = Vec::with_capacity(buckets.len());
    for bucket in &buckets {
        let color = heat_color(bucket);
        let cell = "█".repeat(slot_width as usize);
        strip_spans.push(Span::styled(cell, Style::default().fg(color)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(strip_spans)),
        Rect::new(area.x, strip_y, area.width, 1),
    );

    let indices = app
        .board
        .label_indices(buckets.len(), slot_width, app.min_label_gap);
    let mut labels = vec![" ".to_string(); area.width as usize];
    for index in indices {
        let x = index * slot_width as usize;
        let text = buckets[index].date.format("%m/%d").to_string();
        for (offset, ch) in text.chars().enumerate() {
            if x + offset < labels.len() {
                labels[x + offset] = ch.to_string();
            }
        }
    }
    frame.render_widget(
        Paragraph::new(labels.concat()).style(Style::default().fg(Color::Gray)),
        Rect::new(area.x, labels_y, area.width, 1),
    );

    if area.height > 2 {
        let sep = "─".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(sep).style(Style::default().fg(CHROME)),
            Rect::new(area.x, area.y + 2, area.width, 1),
        );
    }
}

fn heat_color(bucket: &DensityBucket) -> Color {
    if bucket.event_count == 0 {
        return HEAT_RAMP[0];
    }
    let step = (bucket.intensity * (HEAT_RAMP.len() - 1) as f64).ceil() as usize;
    HEAT_RAMP[step.clamp(1, HEAT_RAMP.len() - 1)]
}

/// Render the lane list, honoring the board's scroll offset. Returns the
/// selected card's rectangle for popover anchoring.
fn render_lanes(frame: &mut Frame, app: &App, area: Rect) -> Option<Rect> {
    let zoom = app.board.zoom();
    let height = lane_height(zoom);
    let mut y = area.y;
    let mut anchor = None;

    for (index, lane) in app
        .board
        .lanes()
        .iter()
        .enumerate()
        .skip(app.board.scroll_offset())
    {
        if y + height > area.y + area.height {
            break;
        }
        let lane_area = Rect::new(area.x, y, area.width, height);
        let focused = index == app.board.focused_lane_index();
        let card = render_lane(frame, app, lane, lane_area, focused);
        if focused {
            anchor = card;
        }
        y += height;
    }
    anchor
}

/// Render one lane: a title row plus its events at the active zoom level.
fn render_lane(
    frame: &mut Frame,
    app: &App,
    lane: &SessionLane,
    area: Rect,
    focused: bool,
) -> Option<Rect> {
    let pinned = app.board.view().pinned_sessions.contains(&lane.meta.id);
    let marker = if focused { "▶" } else { " " };
    let pin = if pinned { "📌 " } else { "" };
    let title_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let title = Line::from(vec![
        Span::styled(format!("{marker} {pin}"), title_style),
        Span::styled(format::truncate(&lane.meta.title, 48), title_style),
        Span::styled(
            format!(
                "  {} events, {}",
                lane.meta.event_count,
                format::format_relative_time_opt(lane.meta.last_activity)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(title),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let body = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
    match app.board.zoom() {
        ZoomLevel::Compact => {
            render_tick_row(frame, app, lane, body, focused);
            None
        }
        ZoomLevel::Summary => render_summary_rows(frame, app, lane, body, focused),
        ZoomLevel::Detail => render_detail_cards(frame, app, lane, body, focused),
    }
}

/// Level 0: one compact tick per event, height encoded in the glyph, color
/// by precedence. No expansion affordance.
fn render_tick_row(frame: &mut Frame, app: &App, lane: &SessionLane, area: Rect, focused: bool) {
    let width = area.width as usize;
    if width == 0 {
        return;
    }
    // Show the most recent events that fit, one column each.
    let start = lane.events.len().saturating_sub(width);
    let mut spans: Vec<Span> = Vec::new();
    for (offset, event) in lane.events[start..].iter().enumerate() {
        let glyph = tick_glyph(event);
        let selected = focused && start + offset == app.selected_event;
        let mut style = Style::default().fg(event_color(event, app));
        if selected {
            style = style.bg(Color::Rgb(70, 70, 70));
        }
        spans.push(Span::styled(glyph, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Map the tick height (4..=20 units) onto the eight block glyphs.
fn tick_glyph(event: &EventRecord) -> &'static str {
    const GLYPHS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
    let height = tick_height(event.token_total());
    let step = ((height - 4) as usize * (GLYPHS.len() - 1)) / 16;
    GLYPHS[step.min(GLYPHS.len() - 1)]
}

/// Level 1: fixed-height summary rows with icon, category label, and a
/// content preview, windowed around the selection.
fn render_summary_rows(
    frame: &mut Frame,
    app: &App,
    lane: &SessionLane,
    area: Rect,
    focused: bool,
) -> Option<Rect> {
    let rows = area.height as usize;
    if rows == 0 || lane.events.is_empty() {
        return None;
    }
    let pivot = if focused { app.selected_event } else { lane.events.len() - 1 };
    let start = pivot.saturating_sub(rows - 1).min(lane.events.len().saturating_sub(rows));
    let mut anchor = None;

    for (row, (index, event)) in lane
        .events
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .enumerate()
    {
        let row_area = Rect::new(area.x, area.y + row as u16, area.width, 1);
        let selected = focused && index == app.selected_event;
        if selected {
            anchor = Some(row_area);
        }
        let line = summary_line(app, event, selected);
        frame.render_widget(Paragraph::new(line), row_area);
    }
    anchor
}

fn summary_line<'a>(app: &App, event: &'a EventRecord, selected: bool) -> Line<'a> {
    let dimmed = app.board.is_dimmed(event);
    let color = event_color(event, app);
    let mut label_style = Style::default().fg(color);
    let mut text_style = Style::default().fg(Color::White);
    if dimmed {
        label_style = dim(label_style);
        text_style = dim(text_style);
    }
    if selected {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }
    if app.is_flashed(&event.id) {
        text_style = Style::default().fg(Color::Black).bg(FLASH);
    }

    let mut spans = vec![
        Span::styled(format!("  {} ", event_icon(event)), label_style),
        Span::styled(format!("{:<9} ", event.render_category()), label_style),
        Span::styled(event.preview.clone(), text_style),
    ];
    if event.status == EventStatus::Error {
        spans.push(Span::styled(
            "  ✗",
            if dimmed {
                dim(Style::default().fg(STATUS_ERROR))
            } else {
                Style::default().fg(STATUS_ERROR)
            },
        ));
    }
    Line::from(spans)
}

/// Level 2: multi-line detail cards with full content, a touched-file
/// badge, and a usage footer.
fn render_detail_cards(
    frame: &mut Frame,
    app: &App,
    lane: &SessionLane,
    area: Rect,
    focused: bool,
) -> Option<Rect> {
    let slots = (area.height / DETAIL_CARD_ROWS) as usize;
    if slots == 0 || lane.events.is_empty() {
        return None;
    }
    let pivot = if focused { app.selected_event } else { lane.events.len() - 1 };
    let start = pivot.saturating_sub(slots - 1).min(lane.events.len().saturating_sub(slots));
    let mut anchor = None;

    for (slot, (index, event)) in lane
        .events
        .iter()
        .enumerate()
        .skip(start)
        .take(slots)
        .enumerate()
    {
        let card_area = Rect::new(
            area.x,
            area.y + slot as u16 * DETAIL_CARD_ROWS,
            area.width,
            DETAIL_CARD_ROWS,
        );
        let selected = focused && index == app.selected_event;
        if selected {
            anchor = Some(card_area);
        }
        render_detail_card(frame, app, event, card_area, selected);
    }
    anchor
}

fn render_detail_card(frame: &mut Frame, app: &App, event: &EventRecord, area: Rect, selected: bool) {
    let dimmed = app.board.is_dimmed(event);
    let flashed = app.is_flashed(&event.id);
    let color = event_color(event, app);

    let mut header_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let mut body_style = Style::default().fg(Color::White);
    let meta_style = Style::default().fg(Color::DarkGray);
    if dimmed {
        header_style = dim(header_style);
        body_style = dim(body_style);
    }
    if flashed {
        body_style = Style::default().fg(Color::Black).bg(FLASH);
    }

    let marker = if selected { "┃" } else { " " };
    let header = Line::from(vec![
        Span::styled(format!("{marker} {} ", event_icon(event)), header_style),
        Span::styled(event.render_category().to_string(), header_style),
        Span::styled(
            format!(
                "  {}  {}",
                event.timestamp.format("%H:%M:%S"),
                event.model.as_deref().unwrap_or(""),
            ),
            meta_style,
        ),
    ]);

    let body = Line::from(vec![
        Span::raw("   "),
        Span::styled(format::truncate(&event.content.replace('\n', " "), 120), body_style),
    ]);

    let mut footer_spans = vec![Span::raw("   ")];
    if let Some(tokens) = event.token_counts {
        footer_spans.push(Span::styled(
            format!(
                "in {} / out {}  ",
                format::format_tokens(tokens.input),
                format::format_tokens(tokens.output)
            ),
            meta_style,
        ));
    }
    if event.edits_files() {
        footer_spans.push(Span::styled(
            format!("✎ {} file(s)", event.touched_files.len()),
            if dimmed {
                dim(Style::default().fg(TOOL_FILE))
            } else {
                Style::default().fg(TOOL_FILE)
            },
        ));
    }
    if event.made_commit {
        footer_spans.push(Span::styled("  ⎇ commit", meta_style.fg(TOOL_GIT)));
    }

    frame.render_widget(
        Paragraph::new(vec![header, body, Line::from(footer_spans)]),
        area,
    );
}

/// Full-session detail view, reached through a deep link.
fn render_detail_view(frame: &mut Frame, app: &App, session_title: String) -> Option<Rect> {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Event cards
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let header = Paragraph::new(format!(" {} ", format::truncate(&session_title, 72))).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(30, 30, 30))
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(header, chunks[0]);

    let mut anchor = None;
    if let Some(lane) = app.board.focused_lane() {
        let body = chunks[1];
        let slots = (body.height / DETAIL_CARD_ROWS) as usize;
        if slots > 0 {
            let start = app
                .detail_scroll
                .min(lane.events.len().saturating_sub(slots));
            for (slot, (index, event)) in lane
                .events
                .iter()
                .enumerate()
                .skip(start)
                .take(slots)
                .enumerate()
            {
                let card_area = Rect::new(
                    body.x,
                    body.y + slot as u16 * DETAIL_CARD_ROWS,
                    body.width,
                    DETAIL_CARD_ROWS,
                );
                let selected = index == app.detail_selected;
                if selected {
                    anchor = Some(card_area);
                }
                render_detail_card(frame, app, event, card_area, selected);
            }
        }
    }

    let footer = Paragraph::new(" ↑↓ select   space expand   esc back ")
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, chunks[2]);
    anchor
}

fn render_board_footer(frame: &mut Frame, app: &App, area: Rect) {
    let brush_desc = match app.board.brush() {
        Some(brush) => {
            let kind = match brush.kind {
                BrushKind::Model => "model",
                BrushKind::Tool => "tool",
                BrushKind::Status => "status",
                BrushKind::File => "file",
            };
            format!("brush {kind}:{}", brush.value)
        }
        None => "no brush".to_string(),
    };
    let skipped = match app.board.skipped_records() {
        0 => String::new(),
        n => format!("  {n} skipped record(s)"),
    };
    let footer = Paragraph::new(format!(
        " {brush_desc}{skipped}   z zoom  ↑↓ lane  ←→ event  ⏎ open  m/t/s/f brush  c clear  p pin  q quit "
    ))
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, area);
}

/// Render the expanded popover anchored to `trigger`.
fn render_popover(frame: &mut Frame, app: &App, event_index: usize, trigger: Rect) {
    let Some(event) = app
        .board
        .focused_lane()
        .and_then(|l| l.events.get(event_index))
    else {
        return;
    };

    let viewport = frame.area();
    let width = (viewport.width / 2).clamp(24, 60).min(viewport.width);
    let height = 12.min(viewport.height);
    let area = place_popover(trigger, viewport, width, height);

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", event_icon(event), event.render_category()),
            Style::default()
                .fg(event_color(event, app))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            event.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for text_line in event.content.lines().take(5) {
        lines.push(Line::from(format::truncate(text_line, width as usize - 4)));
    }
    if let Some(tokens) = event.token_counts {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "tokens: in {} / out {}",
                format::format_tokens(tokens.input),
                format::format_tokens(tokens.output)
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    for file in event.touched_files.iter().take(2) {
        lines.push(Line::from(Span::styled(
            format!("✎ {file}"),
            Style::default().fg(TOOL_FILE),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(CHROME))
        .title(" event ")
        .title_bottom(" esc close ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Viewport-aware popover placement.
///
/// Prefers the right side of the trigger with a fixed gap, flips to the left
/// when the right edge would overflow, and shifts the vertical position up
/// just enough to fit, bounded by a minimum top margin.
fn place_popover(trigger: Rect, viewport: Rect, width: u16, height: u16) -> Rect {
    let right_x = trigger.x.saturating_add(trigger.width).saturating_add(POPOVER_GAP);
    let x = if right_x + width > viewport.x + viewport.width {
        // Flip to the left of the trigger, clamped to the viewport edge.
        trigger
            .x
            .saturating_sub(POPOVER_GAP + width)
            .max(viewport.x)
    } else {
        right_x
    };

    let bottom_limit = (viewport.y + viewport.height).saturating_sub(height);
    let y = trigger
        .y
        .min(bottom_limit)
        .max(viewport.y + POPOVER_TOP_MARGIN.min(viewport.height.saturating_sub(1)));

    Rect::new(
        x,
        y,
        width.min(viewport.width),
        height.min(viewport.height),
    )
}

/// Color precedence for an event: error beats file-edit beats role/tool.
fn event_color(event: &EventRecord, app: &App) -> Color {
    if app.board.is_dimmed(event) {
        return DIMMED;
    }
    if event.status == EventStatus::Error {
        return STATUS_ERROR;
    }
    if event.edits_files() {
        return TOOL_FILE;
    }
    match event.tool_kind {
        Some(ToolKind::FileOp) => TOOL_FILE,
        Some(ToolKind::Search) => TOOL_SEARCH,
        Some(ToolKind::Shell) => TOOL_SHELL,
        Some(ToolKind::Git) => TOOL_GIT,
        Some(ToolKind::Web) => TOOL_WEB,
        Some(ToolKind::Task) => TOOL_TASK,
        Some(ToolKind::Other) => Color::Gray,
        None => match event.role {
            Role::User => ROLE_USER,
            Role::Assistant => ROLE_ASSISTANT,
            Role::Tool => Color::Gray,
        },
    }
}

fn event_icon(event: &EventRecord) -> &'static str {
    if event.status == EventStatus::Error {
        return "✗";
    }
    if event.status == EventStatus::Cancelled {
        return "⊘";
    }
    match event.tool_kind {
        Some(ToolKind::FileOp) => "✎",
        Some(ToolKind::Search) => "⌕",
        Some(ToolKind::Shell) => "$",
        Some(ToolKind::Git) => "⎇",
        Some(ToolKind::Web) => "🌐",
        Some(ToolKind::Task) => "⚙",
        Some(ToolKind::Other) => "•",
        None => match event.role {
            Role::User => "›",
            Role::Assistant => "✦",
            Role::Tool => "•",
        },
    }
}

fn dim(style: Style) -> Style {
    style.fg(DIMMED).add_modifier(Modifier::DIM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popover_prefers_right_side() {
        let viewport = Rect::new(0, 0, 120, 40);
        let trigger = Rect::new(10, 5, 30, 3);
        let area = place_popover(trigger, viewport, 40, 12);
        assert_eq!(area.x, 10 + 30 + POPOVER_GAP);
        assert_eq!(area.y, 5);
    }

    #[test]
    fn test_popover_flips_left_on_right_overflow() {
        let viewport = Rect::new(0, 0, 80, 40);
        let trigger = Rect::new(50, 5, 28, 3);
        let area = place_popover(trigger, viewport, 40, 12);
        assert_eq!(area.x, 50 - POPOVER_GAP - 40);
    }

    #[test]
    fn test_popover_clamps_to_left_viewport_edge() {
        let viewport = Rect::new(0, 0, 50, 40);
        let trigger = Rect::new(2, 5, 46, 3);
        let area = place_popover(trigger, viewport, 40, 12);
        assert_eq!(area.x, viewport.x);
    }

    #[test]
    fn test_popover_shifts_up_to_fit_bottom() {
        let viewport = Rect::new(0, 0, 120, 20);
        let trigger = Rect::new(10, 15, 30, 3);
        let area = place_popover(trigger, viewport, 40, 12);
        // Shifted up just enough: bottom edge lands on the viewport bottom.
        assert_eq!(area.y + area.height, viewport.y + viewport.height);
    }

    #[test]
    fn test_popover_respects_top_margin() {
        let viewport = Rect::new(0, 0, 120, 10);
        let trigger = Rect::new(10, 0, 30, 1);
        let area = place_popover(trigger, viewport, 40, 9);
        assert!(area.y >= viewport.y + POPOVER_TOP_MARGIN);
    }

    #[test]
    fn test_lane_height_grows_with_zoom() {
        assert!(lane_height(ZoomLevel::Compact) < lane_height(ZoomLevel::Summary));
        assert!(lane_height(ZoomLevel::Summary) < lane_height(ZoomLevel::Detail));
    }

    #[test]
    fn test_board_lane_capacity_accounts_for_chrome() {
        // 24 rows minus 5 rows of header/heatmap/footer leaves 19 for lanes.
        assert_eq!(board_lane_capacity(24, ZoomLevel::Summary), 4);
        assert_eq!(board_lane_capacity(24, ZoomLevel::Compact), 9);
        assert_eq!(board_lane_capacity(3, ZoomLevel::Summary), 0);
    }

    #[test]
    fn test_detail_card_capacity() {
        assert_eq!(detail_card_capacity(11), 3);
        assert_eq!(detail_card_capacity(2), 0);
    }
}
