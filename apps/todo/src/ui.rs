//! Terminal painter for the todo window.
//!
//! Draws an [`AppView`] onto a ratatui [`Frame`] and reports where the
//! clickable triggers ended up, so mouse events can be mapped back to
//! actions.

use crate::types::{TodoAction, TodoId};
use crate::view::{AppView, InputView, RowStyle, RowView, WindowView};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;

/// Colors of the vintage desktop look
pub mod palette {
    use ratatui::style::Color;

    /// Desktop behind the window
    pub const DESKTOP: Color = Color::Rgb(0xd7, 0xd7, 0xd7);
    /// Menu bar and buttons
    pub const CHROME: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    /// Window body
    pub const WINDOW: Color = Color::Rgb(0xf8, 0xf8, 0xf8);
    /// Window and field borders, count badge
    pub const BORDER: Color = Color::Rgb(0xbf, 0xbf, 0xbf);
    /// Regular text
    pub const TEXT: Color = Color::Rgb(0x22, 0x22, 0x22);
    /// Footer text
    pub const FOOTER: Color = Color::Rgb(0x33, 0x33, 0x33);
    /// Done todos and the placeholder
    pub const MUTED: Color = Color::Rgb(0x99, 0x99, 0x99);
    /// Entry field and pending rows
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0xff, 0xff);
    /// Done rows
    pub const NEUTRAL: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    /// Delete buttons
    pub const DESTRUCTIVE: Color = Color::Rgb(0xff, 0xb0, 0xb0);
}

const WINDOW_MIN_WIDTH: u16 = 36;
const WINDOW_MAX_WIDTH: u16 = 56;
/// Menu bar plus one blank line
const WINDOW_TOP: u16 = 2;
const INPUT_HEIGHT: u16 = 3;
const ADD_WIDTH: u16 = 7;
const DELETE_WIDTH: u16 = 8;
/// Input row, gap, gap, footer
const FIXED_INNER_HEIGHT: u16 = INPUT_HEIGHT + 3;

/// Something the user can click
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// The "Add" button
    AddButton,
    /// Glyph and text of a row
    Toggle(TodoId),
    /// "Delete" button of a row
    Delete(TodoId),
}

impl HitTarget {
    /// Action dispatched when the target is activated
    #[must_use]
    pub const fn action(self) -> TodoAction {
        match self {
            Self::AddButton => TodoAction::AddTodo,
            Self::Toggle(id) => TodoAction::ToggleTodo { id },
            Self::Delete(id) => TodoAction::DeleteTodo { id },
        }
    }
}

/// Click regions produced by the last paint
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Target under a terminal cell, if any
    #[must_use]
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .find(|(area, _)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(_, target)| *target)
    }

    /// Where a target was drawn
    #[must_use]
    pub fn region_of(&self, target: HitTarget) -> Option<Rect> {
        self.regions
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(area, _)| *area)
    }

    /// True when nothing clickable was drawn
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Paint the whole screen and return the click regions
pub fn paint(frame: &mut Frame, view: &AppView) -> HitMap {
    let area = frame.size();
    let mut hits = HitMap::default();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DESKTOP)),
        area,
    );

    if area.height == 0 {
        return hits;
    }

    let menu_bar = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(format!(" {}", view.menu_title))
            .style(Style::default().bg(palette::CHROME).fg(palette::TEXT)),
        menu_bar,
    );

    let Some(window) = window_area(area, view.window.rows.len()) else {
        return hits;
    };
    paint_window(frame, window, &view.window, &mut hits);

    hits
}

/// Centered window sized to its rows, clipped to the screen
fn window_area(area: Rect, rows: usize) -> Option<Rect> {
    let width = area
        .width
        .saturating_sub(4)
        .min(WINDOW_MAX_WIDTH)
        .max(WINDOW_MIN_WIDTH.min(area.width));
    let available = area.height.saturating_sub(WINDOW_TOP + 1);
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    let wanted = FIXED_INNER_HEIGHT.saturating_add(rows).saturating_add(2);
    let height = wanted.min(available);

    if height < 3 || width < 3 {
        return None;
    }

    Some(Rect::new(
        area.x + (area.width - width) / 2,
        area.y + WINDOW_TOP,
        width,
        height,
    ))
}

fn paint_window(frame: &mut Frame, area: Rect, window: &WindowView, hits: &mut HitMap) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", window.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", window.badge),
            Style::default().bg(palette::BORDER).fg(palette::TEXT),
        ),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER))
        .style(Style::default().bg(palette::WINDOW).fg(palette::TEXT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT), // Input row
            Constraint::Length(1),            // Gap
            Constraint::Min(0),               // Todo rows
            Constraint::Length(1),            // Gap
            Constraint::Length(1),            // Footer
        ])
        .split(inner);

    paint_input_row(frame, chunks[0], &window.input, window.add_label, hits);

    for (offset, row) in (0..chunks[2].height).zip(&window.rows) {
        let row_area = Rect::new(chunks[2].x, chunks[2].y + offset, chunks[2].width, 1);
        paint_row(frame, row_area, row, hits);
    }

    frame.render_widget(
        Paragraph::new(window.footer.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(palette::FOOTER)),
        chunks[4],
    );
}

fn paint_input_row(
    frame: &mut Frame,
    area: Rect,
    input: &InputView,
    add_label: &str,
    hits: &mut HitMap,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(ADD_WIDTH),
        ])
        .split(area);

    let field = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette::BORDER))
        .style(Style::default().bg(palette::HIGHLIGHT).fg(palette::TEXT));
    let field_inner = field.inner(chunks[0]);
    frame.render_widget(field, chunks[0]);

    if input.shows_placeholder() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                input.placeholder,
                Style::default()
                    .fg(palette::MUTED)
                    .add_modifier(Modifier::ITALIC),
            )),
            field_inner,
        );
    } else {
        // Leave one cell for the cursor
        let max_width = usize::from(field_inner.width.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(visible_tail(&input.value, max_width)),
            field_inner,
        );
    }

    if field_inner.width > 0 && field_inner.height > 0 {
        let typed = if input.shows_placeholder() {
            0
        } else {
            let max_width = usize::from(field_inner.width.saturating_sub(1));
            Span::raw(visible_tail(&input.value, max_width)).width()
        };
        let typed = u16::try_from(typed).unwrap_or(u16::MAX);
        let cursor_x = field_inner
            .x
            .saturating_add(typed)
            .min(field_inner.x + field_inner.width - 1);
        frame.set_cursor(cursor_x, field_inner.y);
    }

    let button = Paragraph::new(add_label)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .bg(palette::CHROME)
                .fg(palette::TEXT)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(palette::BORDER)),
        );
    frame.render_widget(button, chunks[2]);
    hits.push(chunks[2], HitTarget::AddButton);
}

fn paint_row(frame: &mut Frame, area: Rect, row: &RowView, hits: &mut HitMap) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(DELETE_WIDTH),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(format!(" {}", row.label())).style(row_style(row.style)),
        chunks[0],
    );
    hits.push(chunks[0], HitTarget::Toggle(row.id));

    frame.render_widget(
        Paragraph::new(row.delete_label)
            .alignment(Alignment::Center)
            .style(Style::default().bg(palette::DESTRUCTIVE).fg(palette::TEXT)),
        chunks[2],
    );
    hits.push(chunks[2], HitTarget::Delete(row.id));
}

/// Terminal style for a row treatment
#[must_use]
pub fn row_style(style: RowStyle) -> Style {
    let mut out = Style::default();
    out = if style.highlighted() {
        out.bg(palette::HIGHLIGHT)
    } else {
        out.bg(palette::NEUTRAL)
    };
    out = if style.muted() {
        out.fg(palette::MUTED)
    } else {
        out.fg(palette::TEXT).add_modifier(Modifier::BOLD)
    };
    if style.strikethrough() {
        out = out.add_modifier(Modifier::CROSSED_OUT);
    }
    out
}

/// Longest suffix of `value` that fits in `max_width` cells, cut on grapheme boundaries
fn visible_tail(value: &str, max_width: usize) -> &str {
    value
        .grapheme_indices(true)
        .map(|(idx, _)| &value[idx..])
        .find(|tail| Span::raw(*tail).width() <= max_width)
        .unwrap_or("")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use crate::types::{TodoItem, TodoState};
    use crate::view::render;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use retro_core::environment::Clock;
    use retro_testing::{SequentialIdGenerator, test_clock};

    fn id(n: u64) -> TodoId {
        TodoId::from_uuid(SequentialIdGenerator::nth(n))
    }

    fn state_with(items: &[(&str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for (n, (text, done)) in (1..).zip(items) {
            let mut item = TodoItem::new(id(n), (*text).to_string(), test_clock().now());
            item.done = *done;
            state.todos.push(item);
        }
        state
    }

    fn draw(state: &TodoState, width: u16, height: u16) -> (Buffer, HitMap) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| hits = paint(frame, &render(state)))
            .unwrap();
        (terminal.backend().buffer().clone(), hits)
    }

    fn text_of(buffer: &Buffer) -> String {
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn paints_chrome_and_empty_list() {
        let (buffer, hits) = draw(&TodoState::new(), 60, 20);
        let content = text_of(&buffer);

        assert!(content.contains("Utopia Mac"));
        assert!(content.contains("Todo List"));
        assert!(content.contains("New todo"));
        assert!(content.contains("Add"));
        assert!(content.contains("0 items remaining"));
        assert!(hits.region_of(HitTarget::AddButton).is_some());
    }

    #[test]
    fn paints_rows_with_triggers() {
        let (buffer, hits) = draw(&state_with(&[("Buy milk", false)]), 60, 20);
        let content = text_of(&buffer);

        assert!(content.contains("Buy milk"));
        assert!(content.contains("Delete"));
        assert!(content.contains("1 items remaining"));

        let toggle = hits.region_of(HitTarget::Toggle(id(1))).unwrap();
        let delete = hits.region_of(HitTarget::Delete(id(1))).unwrap();
        assert_eq!(toggle.y, delete.y);
        assert!(toggle.x + toggle.width <= delete.x);
        assert_eq!(
            hits.target_at(delete.x + 1, delete.y),
            Some(HitTarget::Delete(id(1)))
        );
        assert_eq!(hits.target_at(toggle.x, toggle.y), Some(HitTarget::Toggle(id(1))));
    }

    #[test]
    fn done_rows_are_struck_through() {
        let (buffer, hits) = draw(&state_with(&[("A", true), ("B", false)]), 60, 20);

        let done = hits.region_of(HitTarget::Toggle(id(1))).unwrap();
        let pending = hits.region_of(HitTarget::Toggle(id(2))).unwrap();

        let done_cell = buffer.get(done.x, done.y);
        assert!(done_cell.modifier.contains(Modifier::CROSSED_OUT));
        assert_eq!(done_cell.fg, palette::MUTED);
        assert_eq!(done_cell.bg, palette::NEUTRAL);

        let pending_cell = buffer.get(pending.x, pending.y);
        assert!(!pending_cell.modifier.contains(Modifier::CROSSED_OUT));
        assert_eq!(pending_cell.bg, palette::HIGHLIGHT);
    }

    #[test]
    fn typed_text_replaces_placeholder() {
        let mut state = TodoState::new();
        state.input_text = "Walk dog".to_string();

        let content = text_of(&draw(&state, 60, 20).0);

        assert!(content.contains("Walk dog"));
        assert!(!content.contains("New todo"));
    }

    #[test]
    fn rows_beyond_window_are_not_clickable() {
        let items: Vec<(String, bool)> = (1..=30).map(|n| (format!("item {n}"), false)).collect();
        let borrowed: Vec<(&str, bool)> = items.iter().map(|(t, d)| (t.as_str(), *d)).collect();

        let (_, hits) = draw(&state_with(&borrowed), 60, 16);

        assert!(hits.region_of(HitTarget::Toggle(id(1))).is_some());
        assert!(hits.region_of(HitTarget::Toggle(id(30))).is_none());
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (_, hits) = draw(&state_with(&[("A", false)]), 10, 3);
        assert!(hits.is_empty());
    }

    #[test]
    fn hit_target_actions() {
        assert_eq!(HitTarget::AddButton.action(), TodoAction::AddTodo);
        assert_eq!(
            HitTarget::Toggle(id(3)).action(),
            TodoAction::ToggleTodo { id: id(3) }
        );
        assert_eq!(
            HitTarget::Delete(id(3)).action(),
            TodoAction::DeleteTodo { id: id(3) }
        );
    }

    #[test]
    fn visible_tail_keeps_the_end() {
        assert_eq!(visible_tail("hello", 10), "hello");
        assert_eq!(visible_tail("hello", 3), "llo");
        assert_eq!(visible_tail("hello", 0), "");
    }
}
