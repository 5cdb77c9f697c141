//! Animated collection list
//!
//! Each row is a title line and two detail lines. While a row enters, its
//! colors fade in from the screen background and it sits one terminal line
//! lower, which is how the 20px slide reads on a character grid.

use std::time::Instant;

use libstarlist::animation::RowFrame;
use libstarlist::{CollectionKind, CollectionRecord};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::Palette;
use crate::app::{Animations, ScreenView};

/// Placeholder shown until the fetch completes
pub const LOADING_TEXT: &str = "Loading...";

/// Lines reserved per row: three of content and one of spacing
pub const ROW_HEIGHT: u16 = 4;

/// Pixels of entrance offset per terminal line
pub const PX_PER_LINE: f64 = 20.0;

/// Terminal lines a row is pushed down by its entrance offset
pub fn offset_lines(offset_px: f64) -> u16 {
    (offset_px.max(0.0) / PX_PER_LINE).round() as u16
}

/// Title followed by detail lines
pub fn row_lines(kind: CollectionKind, record: &CollectionRecord) -> Vec<String> {
    let mut lines = vec![kind.title_of(record)];
    lines.extend(kind.detail_lines(record));
    lines
}

pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    view: &ScreenView,
    animations: &Animations,
    now: Instant,
    palette: &Palette,
) {
    let screen = &view.screen;
    let kind = screen.kind;

    if screen.is_loading {
        let loading = Paragraph::new(LOADING_TEXT)
            .alignment(Alignment::Center)
            .style(palette.screen().add_modifier(Modifier::BOLD));
        frame.render_widget(loading, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ({}) ", kind.title(), screen.items.len()))
        .style(palette.screen());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut y = inner.y;
    let rows = screen.items.iter().zip(screen.row_ids());
    for (item, row) in rows.skip(view.scroll) {
        if y >= inner.bottom() {
            break;
        }
        let slot = Rect {
            y,
            height: ROW_HEIGHT.min(inner.bottom() - y),
            ..inner
        };
        let row_frame = animations.frame(kind, &row, now);
        render_row(frame, slot, kind, item, row_frame, palette);
        y = y.saturating_add(ROW_HEIGHT);
    }
}

fn render_row(
    frame: &mut Frame,
    slot: Rect,
    kind: CollectionKind,
    record: &CollectionRecord,
    row_frame: RowFrame,
    palette: &Palette,
) {
    // Without colors there is no fade; rows pop in halfway through
    if !palette.colors && row_frame.opacity < 0.5 {
        return;
    }

    let shift = offset_lines(row_frame.offset_px).min(slot.height);
    let content = Rect {
        y: slot.y + shift,
        height: (slot.height - shift).min(ROW_HEIGHT - 1),
        ..slot
    };
    if content.height == 0 {
        return;
    }

    let opacity = row_frame.opacity;
    let lines: Vec<Line> = row_lines(kind, record)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style: Style = if i == 0 {
                palette.row_title(opacity)
            } else {
                palette.row_detail(opacity)
            };
            Line::styled(format!(" {}", text), style)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(palette.row_background(opacity)),
        content,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offset_lines() {
        assert_eq!(offset_lines(20.0), 1);
        assert_eq!(offset_lines(10.0), 1);
        assert_eq!(offset_lines(9.9), 0);
        assert_eq!(offset_lines(0.0), 0);
    }

    #[test]
    fn test_row_lines_for_film() {
        let film = CollectionRecord::from_value(json!({"uid": "1", "name": "A New Hope", "url": "u1"})).unwrap();

        assert_eq!(
            row_lines(CollectionKind::Films, &film),
            vec!["A New Hope", "UID: 1", "URL: u1"]
        );
    }
}
