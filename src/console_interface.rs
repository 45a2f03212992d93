use crate::appearance::AppearanceProvider;
use crate::core::{Direction, GameStatus, MAX_TILE, SquareGameboard, Tile, UserAction, Vec2};
use crate::error::GameError;
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const CELL_WIDTH: usize = 6;

/// Parse a board written as rows of numbers, with `.` for an empty cell.
pub fn parse_board(s: &str) -> Result<SquareGameboard<Tile>, GameError> {
    let mut rows: Vec<Vec<Tile>> = Vec::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let tile = match token {
                "." => Tile::Empty,
                _ => {
                    let value: u32 = token
                        .parse()
                        .map_err(|_| GameError::Parse(format!("bad tile '{}'", token)))?;
                    if !value.is_power_of_two() || value < 2 || value > MAX_TILE {
                        return Err(GameError::Parse(format!("{} is not a tile value", value)));
                    }
                    Tile::Value(value)
                }
            };
            row.push(tile);
        }
        rows.push(row);
    }

    SquareGameboard::from_rows(rows)
        .ok_or_else(|| GameError::Parse("board must be square and non-empty".to_string()))
}

fn tile_token(tile: &Tile) -> String {
    match tile {
        Tile::Empty => ".".to_string(),
        Tile::Value(v) => v.to_string(),
    }
}

pub fn render_board_to_string(board: &SquareGameboard<Tile>) -> String {
    let width = board.rows().flatten().map(|t| tile_token(t).len()).max().unwrap_or(1);
    let mut result = String::new();
    for row in board.rows() {
        let cells: Vec<String> = row.iter().map(|t| format!("{:>width$}", tile_token(t))).collect();
        result.push_str(&cells.join(" "));
        result.push('\n');
    }
    result
}

/// Run `enter`, undoing raw mode through `restore` if it fails.
fn enter_or_restore<T>(
    enter: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, GameError> {
    match enter() {
        Ok(value) => Ok(value),
        Err(err) => {
            let _ = restore();
            Err(err.into())
        }
    }
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, GameError> {
    crossterm::terminal::enable_raw_mode()?;
    enter_or_restore(
        || {
            crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
            Terminal::new(CrosstermBackend::new(io::stdout()))
        },
        crossterm::terminal::disable_raw_mode,
    )
}

pub fn cleanup_terminal() -> Result<(), GameError> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn board_lines<'a>(
    board: &SquareGameboard<Tile>,
    highlights: &[Vec2],
    appearance: &dyn AppearanceProvider,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (i, row) in board.rows().enumerate() {
        let spans: Vec<Span> = row
            .iter()
            .enumerate()
            .map(|(j, tile)| match tile {
                Tile::Empty => Span::styled(
                    format!("{:^CELL_WIDTH$}", "·"),
                    Style::default().fg(Color::DarkGray),
                ),
                Tile::Value(v) => {
                    let mut style = Style::default()
                        .bg(appearance.tile_color(*v))
                        .fg(appearance.number_color(*v));
                    if appearance.font_bold(*v) {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if highlights.contains(&Vec2 { i, j }) {
                        style = style.add_modifier(Modifier::UNDERLINED);
                    }
                    Span::styled(format!("{:^CELL_WIDTH$}", v), style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    appearance: &dyn AppearanceProvider,
    state: &GameRenderState,
) -> Result<(), GameError> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let score_text = format!(
            "Score: {}   Goal: {}   Queued: {}",
            state.score, state.threshold, state.pending
        );
        let score_paragraph = Paragraph::new(score_text)
            .block(Block::default().borders(Borders::ALL).title("2048 of Life"))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(score_paragraph, chunks[0]);

        let board_paragraph = Paragraph::new(board_lines(&state.board, &state.highlights, appearance))
            .block(Block::default().borders(Borders::ALL).title("Board"))
            .alignment(Alignment::Center);
        f.render_widget(board_paragraph, chunks[1]);

        let instructions = match state.status {
            GameStatus::Won => "You Win! Press R to play again or Q to quit.",
            GameStatus::Lost => "No moves left. Press R to play again or Q to quit.",
            GameStatus::Playing => "Controls: WASD or Arrow keys to move, R to restart, Q to quit",
        };

        let instructions = if let Some(err) = &state.error {
            format!("{} | Error: {}", instructions, err)
        } else {
            instructions.to_string()
        };

        let instructions = if state.last_events > 0 {
            format!("{} | Last: {} tile changes", instructions, state.last_events)
        } else {
            instructions
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Quit,
    Timeout,
    Unknown,
}

pub fn key_to_input(code: KeyCode) -> ConsoleInput {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::UserAction(UserAction::Restart),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Up))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Down))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Left))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            ConsoleInput::UserAction(UserAction::Move(Direction::Right))
        }
        _ => ConsoleInput::Unknown,
    }
}

pub fn handle_input() -> Result<ConsoleInput, GameError> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(key_to_input(code));
        }
    }
    Ok(ConsoleInput::Timeout)
}
