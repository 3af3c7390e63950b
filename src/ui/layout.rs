use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Status line on top, the current view in the middle, the input line below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub input: Rect,
}

pub fn split_screen(area: Rect, input_rows: u16) -> ScreenLayout {
    let max_input_rows = area.height.saturating_sub(4).max(1);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(input_rows.clamp(1, max_input_rows)),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        body: chunks[1],
        input: chunks[2],
    }
}
