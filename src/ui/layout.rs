use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::kit::DrumPad;

/// Narrowest button that still fits "Crash Cymbal" inside its border
pub const BUTTON_MIN_WIDTH: u16 = 14;
const BUTTON_HEIGHT: u16 = 3;

/// Screen regions, shared by rendering and mouse hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub board: Rect,
    pub instructions: Rect,
    pub buttons: Rect,
    pub footer: Rect,
}

/// Buttons sit in one row when there is room for eight, otherwise 2×4
fn button_rows(width: u16) -> u16 {
    if width >= BUTTON_MIN_WIDTH * DrumPad::ALL.len() as u16 {
        1
    } else {
        2
    }
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                                // Title
            Constraint::Min(5),                                   // Blackboard
            Constraint::Length(5),                                // Instructions
            Constraint::Length(BUTTON_HEIGHT * button_rows(area.width)), // Buttons
            Constraint::Length(1),                                // Footer
        ])
        .split(area);

    ScreenLayout {
        title: chunks[0],
        board: chunks[1],
        instructions: chunks[2],
        buttons: chunks[3],
        footer: chunks[4],
    }
}

/// One rectangle per pad, in panel order
pub fn button_areas(area: Rect) -> Vec<(DrumPad, Rect)> {
    let rows = button_rows(area.width);
    let per_row = DrumPad::ALL.len() / rows as usize;

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows as usize])
        .split(area);

    row_areas
        .iter()
        .flat_map(|&row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, per_row as u32); per_row])
                .split(row)
                .to_vec()
        })
        .zip(DrumPad::ALL)
        .map(|(rect, pad)| (pad, rect))
        .collect()
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Pad whose button covers the given cell of the full screen
pub fn button_at(viewport: Rect, column: u16, row: u16) -> Option<DrumPad> {
    let buttons = screen_layout(viewport).buttons;
    button_areas(buttons)
        .into_iter()
        .find(|(_, rect)| contains(*rect, column, row))
        .map(|(pad, _)| pad)
}
