use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};

use tetris_engine::board::{BOARD_HEIGHT, BOARD_WIDTH};
use tetris_engine::{Cell, Config, Game, GameEvent, Gravity};

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const IDLE_POLL: Duration = Duration::from_millis(250);

// ============================================================================
// Color Mapping
// ============================================================================

fn terminal_color(color: tetris_engine::Color) -> Color {
    match color {
        tetris_engine::Color::Cyan => Color::Cyan,
        tetris_engine::Color::Yellow => Color::Yellow,
        tetris_engine::Color::Purple => Color::Magenta,
        tetris_engine::Color::Green => Color::Green,
        tetris_engine::Color::Red => Color::Red,
        tetris_engine::Color::Orange => Color::Rgb(255, 165, 0),
        tetris_engine::Color::Blue => Color::Blue,
    }
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::GameStarted => "game started".to_string(),
        GameEvent::PieceSpawned(kind) => format!("{kind:?} ({}) spawned", kind.color().name()),
        GameEvent::PieceMoved => "moved".to_string(),
        GameEvent::PieceRotated => "rotated".to_string(),
        GameEvent::PieceLocked => "locked".to_string(),
        GameEvent::LinesCleared(n) => format!("{n} row(s) cleared"),
        GameEvent::GameOver => "game over".to_string(),
    }
}

// ============================================================================
// Rendering
// ============================================================================

struct View<'a> {
    game: &'a Game,
    status: &'a str,
}

fn render(frame: &mut Frame, view: &View) {
    let area = frame.size();
    render_game(frame, view, area);
    if view.game.is_game_over() {
        render_game_over(frame, view.game, area);
    }
}

fn render_game(frame: &mut Frame, view: &View, area: Rect) {
    let grid_display_width = (BOARD_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = BOARD_HEIGHT as u16 + 2;
    let info_width = 16;
    let total_width = grid_display_width + info_width + 2;
    let total_height = grid_display_height + 3;

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);
    let game_row = vertical[0];

    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(info_width),
    ])
    .split(game_row);

    render_grid(frame, view.game, horizontal[0]);
    render_info(frame, view, horizontal[1]);

    let controls_area = Rect {
        x: area.x,
        y: game_row.y + game_row.height,
        width: area.width,
        height: 2,
    };

    if controls_area.y + 1 < area.height {
        let hint = if view.game.is_playing() {
            "←/A →/D: Move | ↑/W/Space: Rotate | Q/ESC: Quit"
        } else {
            "Enter/S: Start | Q/ESC: Quit"
        };
        let controls = Paragraph::new(vec![Line::from(hint)])
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(controls, controls_area);
    }
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tetris ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => Span::raw(EMPTY_CHAR),
                    Cell::Filled(color) => {
                        Span::styled(BLOCK_CHAR, Style::default().fg(terminal_color(*color)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, view: &View, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", view.game.score())),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", view.game.lines_cleared())),
        Line::from(""),
        Line::from(Span::styled(view.status, Style::default().fg(Color::DarkGray))),
    ];
    if !view.game.is_playing() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[ Start ]",
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, game: &Game, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Your score is {}", game.score())),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to play again",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    let popup_area = centered_rect(26, 10, area);
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &Config) -> Result<()> {
    let mut game = Game::from_config(config);
    let mut gravity = Gravity::new(config.tick_interval());
    let mut status = String::from("press start");

    loop {
        for event in game.take_events() {
            status = describe(&event);
        }

        terminal.draw(|frame| {
            render(
                frame,
                &View {
                    game: &game,
                    status: &status,
                },
            )
        })?;

        let timeout = gravity
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S')
                            if !game.is_playing() =>
                        {
                            game.start();
                            gravity.arm(Instant::now());
                        }
                        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                            game.move_left();
                        }
                        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                            game.move_right();
                        }
                        KeyCode::Up
                        | KeyCode::Char('w')
                        | KeyCode::Char('W')
                        | KeyCode::Char(' ') => {
                            game.rotate();
                        }
                        _ => {}
                    }
                }
            }
        }

        gravity.drive(&mut game, Instant::now());
    }

    Ok(())
}

/// Leaves raw mode and the alternate screen when dropped, including on an
/// early `?` during setup.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

fn main() -> Result<()> {
    let config = Config::parse();

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    run(&mut terminal, &config)
}
