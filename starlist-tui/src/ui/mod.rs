//! UI rendering
//!
//! Render functions transform state into terminal frames. They read the
//! animation clock but never mutate state.

pub mod list;

use std::time::Instant;

use libstarlist::CollectionKind;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tui_textarea::TextArea;

use crate::app::{Animations, AppState};

/// Label of the search button
pub const SEARCH_BUTTON: &str = "Search";

/// Label of the dialog's close button
pub const CLOSE_BUTTON: &str = "[ Close ]";

type Rgb = (u8, u8, u8);

const WHITE: Rgb = (255, 255, 255);
const LIGHT_GRAY: Rgb = (211, 211, 211);

/// Colors of one screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub colors: bool,
    pub background: Rgb,
    pub row: Rgb,
    pub title: Rgb,
    pub detail: Rgb,
}

impl Palette {
    pub fn for_kind(kind: CollectionKind, colors: bool) -> Self {
        let (background, row) = match kind {
            CollectionKind::Films => ((0, 0, 0), (169, 169, 169)),
            CollectionKind::Planets => ((139, 0, 0), (0, 0, 0)),
        };
        Self {
            colors,
            background,
            row,
            title: WHITE,
            detail: LIGHT_GRAY,
        }
    }

    /// Base style of the whole screen
    pub fn screen(&self) -> Style {
        if self.colors {
            Style::default().bg(rgb(self.background)).fg(rgb(WHITE))
        } else {
            Style::default()
        }
    }

    /// Row background faded in from the screen background
    pub fn row_background(&self, opacity: f64) -> Style {
        if self.colors {
            Style::default().bg(rgb(blend(self.background, self.row, opacity)))
        } else {
            Style::default()
        }
    }

    pub fn row_title(&self, opacity: f64) -> Style {
        self.faded(self.title, opacity).add_modifier(Modifier::BOLD)
    }

    pub fn row_detail(&self, opacity: f64) -> Style {
        self.faded(self.detail, opacity)
    }

    fn faded(&self, color: Rgb, opacity: f64) -> Style {
        if self.colors {
            let under = blend(self.background, self.row, opacity);
            Style::default().fg(rgb(blend(under, color, opacity)))
        } else {
            Style::default()
        }
    }
}

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Linear blend from `from` (t = 0) to `to` (t = 1)
pub fn blend(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    (mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Apply a screen's look to the search field
///
/// Called whenever the field is recreated for a screen.
pub fn style_search_field(textarea: &mut TextArea<'_>, kind: CollectionKind, colors: bool) {
    textarea.set_placeholder_text(kind.search_placeholder());
    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    if colors {
        textarea.set_style(Style::default().bg(Color::White).fg(Color::Black));
        textarea.set_placeholder_style(Style::default().fg(Color::Gray));
    }
}

/// Render the application UI
pub fn render(
    frame: &mut Frame,
    state: &AppState,
    search: &TextArea,
    animations: &Animations,
    now: Instant,
) {
    let area = frame.area();
    let kind = state.current_screen;
    let palette = Palette::for_kind(kind, state.config.colors_enabled);

    frame.render_widget(Block::default().style(palette.screen()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                             // Tabs
            Constraint::Length(kind.banner().len() as u16),    // Header art
            Constraint::Length(3),                             // Search bar
            Constraint::Min(3),                                // List
            Constraint::Length(1),                             // Key hints
        ])
        .split(area);

    render_tabs(frame, chunks[0], kind);
    render_banner(frame, chunks[1], kind);
    render_search_bar(frame, chunks[2], search);

    if let Some(view) = state.current() {
        list::render_list(frame, chunks[3], view, animations, now, &palette);
    }

    render_hints(frame, chunks[4], state.modal_open());

    if let Some(view) = state.current() {
        if view.screen.is_modal_open {
            render_search_modal(frame, area, &view.screen.modal_text());
        }
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, current: CollectionKind) {
    let titles: Vec<Line> = CollectionKind::ALL
        .iter()
        .map(|kind| Line::from(format!(" {} ", kind.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(current.index())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .divider("|");

    frame.render_widget(tabs, area);
}

fn render_banner(frame: &mut Frame, area: Rect, kind: CollectionKind) {
    let lines: Vec<Line> = kind.banner().iter().map(|line| Line::from(*line)).collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_search_bar(frame: &mut Frame, area: Rect, search: &TextArea) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    frame.render_widget(search, chunks[0]);

    let button = Paragraph::new(SEARCH_BUTTON)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, chunks[1]);
}

fn render_hints(frame: &mut Frame, area: Rect, modal_open: bool) {
    let hints = if modal_open {
        "Esc/Enter: Close"
    } else {
        "Enter: Search | Tab: Switch | Up/Down: Scroll | Ctrl+C: Quit"
    };
    let line = Line::from(Span::styled(hints, Style::default().fg(Color::Gray)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the search dialog over the current screen
fn render_search_modal(frame: &mut Frame, area: Rect, text: &str) {
    let popup_area = centered_rect(80, 30, area);

    let body = vec![
        Line::from(text.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            CLOSE_BUTTON,
            Style::default().add_modifier(Modifier::REVERSED),
        )),
    ];

    let dialog = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Black)),
        )
        .style(Style::default().bg(Color::White).fg(Color::Black))
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(dialog, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Min(5),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend((0, 0, 0), (255, 255, 255), 0.0), (0, 0, 0));
        assert_eq!(blend((0, 0, 0), (255, 255, 255), 1.0), (255, 255, 255));
        assert_eq!(blend((139, 0, 0), (0, 0, 0), 0.5), (70, 0, 0));
    }

    #[test]
    fn test_palettes_differ_per_screen() {
        let films = Palette::for_kind(CollectionKind::Films, true);
        let planets = Palette::for_kind(CollectionKind::Planets, true);
        assert_ne!(films.background, planets.background);
    }

    #[test]
    fn test_no_color_palette_is_unstyled() {
        let palette = Palette::for_kind(CollectionKind::Films, false);
        assert_eq!(palette.screen(), Style::default());
        assert_eq!(palette.row_background(0.5), Style::default());
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(80, 30, area);
        assert!(popup.width <= 80);
        assert!(popup.height >= 5);
        assert!(popup.x >= 10);
    }
}
