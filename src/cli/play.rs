//! Play command implementation - interactive TUI.

use super::{init_file_logging, load_config, CliError, ScenarioArg};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use skirmish::battle::{BattleSession, Direction, Phase, Side};
use skirmish::render::{battle_cells, overworld_cells, roster_lines, Cell, Glyph};
use skirmish::{Game, GameInput, Scene};
use std::io::stdout;
use std::path::Path;
use std::time::{Duration, Instant};

/// Input poll timeout; also the granularity of the enemy phase timer.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the TUI fails.
pub(crate) fn execute(
    seed: Option<u64>,
    config: Option<&Path>,
    scenario: Option<ScenarioArg>,
    log_file: Option<&Path>,
) -> Result<(), CliError> {
    init_file_logging(log_file)?;
    let config = load_config(config, seed, scenario)?;
    run_tui(Game::new(config))
}

fn key_to_input(code: KeyCode) -> Option<GameInput> {
    let input = match code {
        KeyCode::Up | KeyCode::Char('k') => GameInput::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => GameInput::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => GameInput::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => GameInput::Move(Direction::Right),
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('x') => GameInput::Cancel,
        KeyCode::Char('s') => GameInput::Skip,
        KeyCode::Char('f') => GameInput::Forfeit,
        KeyCode::Char(' ') => GameInput::Interact,
        _ => return None,
    };
    Some(input)
}

fn run_tui(mut game: Game) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, &game)).map_err(|e| CliError::new(e.to_string()))?;

        // Handle input with timeout
        if event::poll(POLL_INTERVAL).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                break;
            }
            if let Some(input) = key_to_input(key.code) {
                game.handle_input(input);
            }
        }

        // Forward elapsed time so the enemy phase fires after its delay
        let now = Instant::now();
        game.update(now - last_tick);
        last_tick = now;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

fn ui(f: &mut Frame, game: &Game) {
    let chunks = Layout::default()
        .direction(Axis::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], game);

    let main_chunks = Layout::default()
        .direction(Axis::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    match game.battle() {
        Some(session) => {
            render_grid(f, main_chunks[0], " Battle ", session.size().width, &battle_cells(session));
            render_battle_panel(f, main_chunks[1], session);
        }
        None => {
            let world = game.overworld();
            render_grid(f, main_chunks[0], " Overworld ", world.size().width, &overworld_cells(world));
            render_world_panel(f, main_chunks[1], game);
        }
    }

    render_footer(f, chunks[2], game);
}

fn render_header(f: &mut Frame, area: Rect, game: &Game) {
    let status = match game.battle() {
        Some(session) => format!("Round {} | {}", session.round(), session.phase().label()),
        None if game.is_over() => "GAME OVER".to_string(),
        None if game.is_won() => "ALL ENEMIES DEFEATED".to_string(),
        None => "EXPLORING".to_string(),
    };
    let hero = game.overworld().hero();
    let title = format!(" Skirmish | {status} | Hero hp {}/{} ", hero.hp(), hero.max_hp());

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_grid(f: &mut Frame, area: Rect, title: &str, width: u16, cells: &[Cell]) {
    let lines: Vec<Line> = cells
        .chunks(usize::from(width).max(1))
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| Span::styled(cell.text(), cell_style(cell)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let grid = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(grid, area);
}

fn cell_style(cell: &Cell) -> Style {
    let fg = match cell.glyph {
        Glyph::Empty => Color::DarkGray,
        Glyph::Wall => Color::White,
        Glyph::Tree => Color::Green,
        Glyph::Unit { alive: false, .. } | Glyph::Unit { acted: true, .. } => Color::DarkGray,
        Glyph::Unit {
            side: Side::Friendly,
            ..
        } => Color::Cyan,
        Glyph::Unit { side: Side::Enemy, .. } => Color::Red,
    };
    let mut style = Style::default().fg(fg);
    if matches!(cell.glyph, Glyph::Unit { alive: true, .. } | Glyph::Wall) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.cursor {
        style = style.bg(Color::Yellow).fg(Color::Black);
    } else if cell.target {
        style = style.bg(Color::LightRed);
    } else if cell.reachable {
        style = style.bg(Color::Blue);
    }
    style
}

fn render_battle_panel(f: &mut Frame, area: Rect, session: &BattleSession) {
    let mut lines: Vec<Line> = vec![Line::from("")];

    let friendly = session.friendly().len();
    for (i, line) in roster_lines(session).into_iter().enumerate() {
        let color = if i < friendly { Color::Cyan } else { Color::Red };
        let mut style = Style::default().fg(color);
        if session.selected_index() == Some(i) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(line, style)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Log", Style::default().add_modifier(Modifier::BOLD))));
    for entry in session.log() {
        lines.push(Line::from(format!("  {entry}")));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Units "))
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

fn render_world_panel(f: &mut Frame, area: Rect, game: &Game) {
    let mut lines: Vec<Line> = vec![Line::from("")];
    for enemy in game.overworld().enemies() {
        let status = if enemy.is_alive() { "roaming" } else { "defeated" };
        lines.push(Line::from(Span::styled(
            format!("{:<8} hp {:>2}/{:<2} {status}", enemy.name, enemy.hp(), enemy.max_hp()),
            Style::default().fg(if enemy.is_alive() { Color::Red } else { Color::DarkGray }),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("@=Hero  #=Wall  T=Tree"));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" World "))
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

fn render_footer(f: &mut Frame, area: Rect, game: &Game) {
    let (message, controls) = match (game.scene(), game.battle()) {
        (Scene::Battle, Some(session)) => {
            let controls = match session.phase() {
                Phase::Victory | Phase::Defeat => " [Enter] Leave battle  [q] Quit ",
                Phase::EnemyPhase => " Enemy turn...  [q] Quit ",
                _ => " [arrows/hjkl] Cursor  [Enter] Confirm  [x] Cancel  [s] Skip  [f] Forfeit  [q] Quit ",
            };
            (session.message(), controls)
        }
        _ => (
            game.message(),
            " [arrows/hjkl] Move  [Space] Engage  [q] Quit ",
        ),
    };

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::White))),
        Line::from(Span::styled(controls, Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
