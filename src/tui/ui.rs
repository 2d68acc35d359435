//! UI rendering using ratatui
//!
//! One screen: header, board on the left, players, rack and hints on the
//! right, feedback and key help at the bottom.

use crate::app::App;
use crate::game::{Cell, Coord, GameView, Premium, Tile, TurnPhase};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Width of one board square in terminal columns
const CELL_WIDTH: u16 = 3;

/// Render the whole game screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let view = app.game.view();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board and side panel
            Constraint::Length(1), // Feedback
            Constraint::Length(1), // Key help
        ])
        .split(area);

    render_header(frame, layout[0], &view);

    let board_width = view.board.size() as u16 * CELL_WIDTH + 2;
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(24)])
        .split(layout[1]);

    render_board(frame, main_layout[0], &view, app.cursor);
    if view.phase == TurnPhase::GameOver {
        render_game_over(frame, main_layout[1], app);
    } else {
        render_side_panel(frame, main_layout[1], &view, &app.hints);
    }

    let (feedback_text, feedback_color) = format_feedback(&app.feedback);
    let feedback = Paragraph::new(feedback_text).style(Style::default().fg(feedback_color));
    frame.render_widget(feedback, layout[2]);

    let footer = Paragraph::new(
        "←↑↓→ Move  A-Z/1-9 Place  Bksp Take back  Enter Commit  Tab Pass  ? Hints  Esc Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Render the header: title, turn, tiles left in the bag
fn render_header(frame: &mut Frame, area: Rect, view: &GameView) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(inner);

    let title = Paragraph::new("SÕNAMÄNG")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let turn = Paragraph::new(format!("Turn {}: {}", view.turn, view.current().name()))
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(turn, header_layout[1]);

    let supply_color = if view.supply_remaining == 0 {
        Color::Red
    } else {
        Color::Green
    };
    let supply = Paragraph::new(format!("Bag: {}", view.supply_remaining))
        .style(Style::default().fg(supply_color))
        .alignment(Alignment::Right);
    frame.render_widget(supply, header_layout[2]);
}

/// Render the board grid
fn render_board(frame: &mut Frame, area: Rect, view: &GameView, cursor: Coord) {
    let lines: Vec<Line> = view
        .board
        .rows()
        .enumerate()
        .map(|(row, cells)| {
            let spans: Vec<Span> = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let coord = Coord::new(row, col);
                    let premium = view.board.premium_at(coord).unwrap_or_default();
                    let mut span = board_cell(
                        cell,
                        premium,
                        view.validation.cell(coord),
                        view.placements.contains(&coord),
                    );
                    if coord == cursor && view.phase != TurnPhase::GameOver {
                        span = span.add_modifier(Modifier::REVERSED);
                    }
                    span
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(board, area);
}

/// Text and colours for one square.
///
/// `flag` is the square's validation flag when a word formed this turn runs
/// through it. Tiles placed this turn are bold and underlined on top of that.
fn board_cell(cell: &Cell, premium: Premium, flag: Option<bool>, this_turn: bool) -> Span<'static> {
    match cell {
        Cell::Occupied(tile) => {
            let bg = match flag {
                Some(true) => Color::Green,
                Some(false) => Color::Red,
                None => Color::Yellow,
            };
            let mut style = Style::default().fg(Color::Black).bg(bg);
            if this_turn {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Span::styled(format!(" {} ", tile_letter(tile)), style)
        }
        Cell::Empty => {
            let color = premium_color(premium);
            let label = match premium {
                Premium::None => " · ".to_string(),
                _ => format!("{:<3}", premium.to_string()),
            };
            Span::styled(label, Style::default().fg(color))
        }
    }
}

/// Render players, the current rack and any hints
fn render_side_panel(frame: &mut Frame, area: Rect, view: &GameView, hints: &[String]) {
    let rows = view.players.len() as u16 + 2;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(rows),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_scores(frame, layout[0], view, &[]);

    let rack = Paragraph::new(format_rack(view.current().rack()))
        .style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!("{}'s rack", view.current().name())),
        );
    frame.render_widget(rack, layout[1]);

    let items: Vec<ListItem> = hints
        .iter()
        .map(|word| ListItem::new(word.clone()).style(Style::default().fg(Color::Green)))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Hints"),
    );
    frame.render_widget(list, layout[2]);
}

/// Render the scoreboard; `winners` are highlighted
fn render_scores(frame: &mut Frame, area: Rect, view: &GameView, winners: &[usize]) {
    let items: Vec<ListItem> = view
        .players
        .iter()
        .enumerate()
        .map(|(i, player)| {
            let is_current = i == view.current_player && view.phase != TurnPhase::GameOver;
            let prefix = if winners.contains(&i) {
                "★ "
            } else if is_current {
                "▶ "
            } else {
                "  "
            };
            let style = if winners.contains(&i) {
                Style::default().fg(Color::Yellow).bold()
            } else if is_current {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{} - {}", prefix, player.name(), player.score())).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Scores"),
    );
    frame.render_widget(list, area);
}

/// Render the final standings
fn render_game_over(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.game.view();
    let winners = app.game.leaders();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(view.players.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new("GAME OVER")
        .style(Style::default().fg(Color::Red).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let names: Vec<&str> = winners
        .iter()
        .map(|&i| view.players[i].name())
        .collect();
    let label = if names.len() > 1 { "Tied" } else { "Winner" };
    let banner = Paragraph::new(format!("{}: {}", label, names.join(", ")))
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(banner, layout[1]);

    render_scores(frame, layout[2], &view, &winners);

    let instructions = Paragraph::new("Press ESC to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, layout[3]);
}

fn tile_letter(tile: &Tile) -> String {
    tile.letter.to_uppercase().to_string()
}

fn premium_color(premium: Premium) -> Color {
    match premium {
        Premium::TripleWord => Color::Red,
        Premium::DoubleWord => Color::LightMagenta,
        Premium::TripleLetter => Color::Blue,
        Premium::DoubleLetter => Color::LightCyan,
        Premium::None => Color::DarkGray,
    }
}

/// Format the rack as numbered letters with their points
fn format_rack(rack: &[Tile]) -> String {
    if rack.is_empty() {
        return String::from("(empty)");
    }
    rack.iter()
        .enumerate()
        .map(|(i, tile)| format!("{}:{}{}", i + 1, tile_letter(tile), subscript(tile.points)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a number with Unicode subscript digits
fn subscript(n: u32) -> String {
    n.to_string()
        .chars()
        .map(|d| match d {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            _ => '₉',
        })
        .collect()
}

/// Format feedback with appropriate color
fn format_feedback(feedback: &str) -> (String, Color) {
    if feedback.is_empty() {
        return (String::new(), Color::White);
    }

    let color = if feedback.starts_with("OK") {
        Color::Green
    } else if feedback.starts_with("Not in dictionary")
        || feedback.starts_with("No ")
        || feedback.to_lowercase().contains("must")
        || feedback.starts_with("Gap")
    {
        Color::Red
    } else if feedback.contains("passed") || feedback.contains("Game over") {
        Color::Yellow
    } else {
        Color::White
    };

    (feedback.to_string(), color)
}
