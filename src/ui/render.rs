use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::Instant;

use super::animation::{AnimationState, LabelAnimation, MIN_LABEL_SIZE};
use super::app::App;
use super::layout::{ScreenLayout, button_areas, screen_layout};
use crate::kit::DrumPad;

const ACCENT: Color = Color::Rgb(0x82, 0x57, 0xe5);

/// Render the TUI
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let layout: ScreenLayout = screen_layout(frame.size());

    render_title(frame, layout.title);
    render_board(frame, layout.board, app, now);
    render_instructions(frame, layout.instructions);
    render_buttons(frame, layout.buttons, app);
    render_footer(frame, layout.footer, app);

    if app.show_help {
        render_help(frame, frame.size());
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("Drum", Style::default().fg(ACCENT)),
        Span::raw("Topia"),
    ]))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, area);
}

/// Blackboard with the animated part label
fn render_board(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let AnimationState::Showing(label) = app.animation.state() else {
        return;
    };
    if inner.height == 0 {
        return;
    }

    let progress = label.progress(now, app.animation.duration());
    let line_area = Rect {
        y: inner.y + drop_offset(progress, inner.height),
        height: 1,
        ..inner
    };

    let text = Paragraph::new(spaced(label.pad.label(), letter_spacing(label.size)))
        .style(label_style(label, progress))
        .alignment(Alignment::Center);
    frame.render_widget(text, line_area);
}

/// Row offset within the board: the label drops in from the top over the
/// first 30% of the animation and rests at the middle afterwards
fn drop_offset(progress: f32, height: u16) -> u16 {
    let rest = height.saturating_sub(1) / 2;
    let fall = (progress / 0.3).min(1.0);
    (rest as f32 * fall).round() as u16
}

/// Spaces inserted between letters for a label size
fn letter_spacing(size: u16) -> usize {
    (size.saturating_sub(MIN_LABEL_SIZE) / 7) as usize
}

fn spaced(text: &str, spacing: usize) -> String {
    if spacing == 0 {
        return text.to_string();
    }
    let gap = " ".repeat(spacing);
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&gap)
}

fn label_style(label: &LabelAnimation, progress: f32) -> Style {
    let color = label
        .color
        .rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White);

    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    // Fade out over the final third
    if progress > 2.0 / 3.0 {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn render_instructions(frame: &mut Frame, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Para tocar a bateria", bold)),
        Line::from(""),
        Line::from(vec![
            Span::raw("Pressione as teclas "),
            Span::styled("A, S, D, F, G, H, J, K", bold),
        ]),
        Line::from("Ou toque pelos botões a baixo"),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_buttons(frame: &mut Frame, area: Rect, app: &App) {
    for (pad, rect) in button_areas(area) {
        render_button(frame, rect, pad, app.is_active(pad));
    }
}

fn render_button(frame: &mut Frame, area: Rect, pad: DrumPad, active: bool) {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let key_hint = format!(" {} ", pad.key().to_ascii_uppercase());
    let button = Paragraph::new(pad.label())
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .title(key_hint)
                .borders(Borders::ALL)
                .border_style(style),
        );

    frame.render_widget(button, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(format!(
        "Esc/q: Quit  |  ?: Help  |  Sounding: {}",
        app.active_voices
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Help overlay
fn render_help(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("Controls:"), Line::from("")];
    for pad in DrumPad::ALL {
        lines.push(Line::from(format!(
            "  {}  {}",
            pad.key().to_ascii_uppercase(),
            pad.label()
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("  Click a button to play it"));
    lines.push(Line::from("  ?  Close help    Esc/q  Quit"));

    let popup = centered(area, 36, lines.len() as u16 + 2);
    let help = Paragraph::new(lines)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
    use std::time::Duration;

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &mut App, now: Instant) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| {
                app.viewport = f.size();
                render(f, app, now);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn app() -> App {
        let (tx, _rx) = unbounded();
        App::new(tx, Duration::from_millis(1000), StdRng::seed_from_u64(5))
    }

    #[test]
    fn test_idle_screen() {
        let mut app = app();
        let text = screen_text(&draw(&mut app, Instant::now()));

        assert!(text.contains("DrumTopia"));
        assert!(text.contains("Para tocar a bateria"));
        assert!(text.contains("Pressione as teclas A, S, D, F, G, H, J, K"));
        assert!(text.contains("Ou toque pelos botões a baixo"));
        for pad in DrumPad::ALL {
            assert!(text.contains(pad.label()), "missing button {}", pad.label());
        }
    }

    #[test]
    fn test_label_shows_while_animating() {
        let mut app = app();
        let now = Instant::now();
        app.press_key('k', now);

        let buffer = draw(&mut app, now + Duration::from_millis(500));
        let board = screen_layout(buffer.area).board;
        let board_text: String = (board.top()..board.bottom())
            .flat_map(|y| (board.left()..board.right()).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();

        let AnimationState::Showing(label) = app.animation.state() else {
            panic!("expected showing");
        };
        let expected = spaced("Ride Cymbal", letter_spacing(label.size));
        assert!(board_text.contains(&expected), "board: {:?}", board_text);
    }

    #[test]
    fn test_active_button_highlighted() {
        let mut app = app();
        app.press_key('s', Instant::now());

        let buffer = draw(&mut app, Instant::now());
        let buttons = button_areas(screen_layout(buffer.area).buttons);
        for (pad, rect) in buttons {
            let cell = buffer.get(rect.x + 1, rect.y + 1);
            if pad == DrumPad::S {
                assert_eq!(cell.bg, ACCENT);
            } else {
                assert_ne!(cell.bg, ACCENT);
            }
        }
    }

    #[test]
    fn test_letter_spacing_by_size() {
        assert_eq!(letter_spacing(30), 0);
        assert_eq!(letter_spacing(36), 0);
        assert_eq!(letter_spacing(37), 1);
        assert_eq!(letter_spacing(43), 1);
        assert_eq!(letter_spacing(44), 2);
        assert_eq!(letter_spacing(49), 2);
        assert_eq!(spaced("Tom", 1), "T o m");
    }

    #[test]
    fn test_drop_offset() {
        assert_eq!(drop_offset(0.0, 11), 0);
        assert_eq!(drop_offset(0.3, 11), 5);
        assert_eq!(drop_offset(1.0, 11), 5);
        assert_eq!(drop_offset(0.5, 1), 0);
    }
}
