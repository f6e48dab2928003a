//! Terminal play surface: renders a card and turns typed coordinates into
//! toggles.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use bingo_card::{BoardEvent, Card, GRID_SIZE, PlayerBoard, WinLine};

/// Characters of item text shown per cell.
const CELL_WIDTH: usize = 14;

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Toggle { row: usize, col: usize },
    Redraw,
    Quit,
    Invalid(String),
}

/// Parses `"<row> <col>"` (1-based), `q`/`quit`, or an empty line.
fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Redraw;
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }

    let coords: Vec<_> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<usize>)
        .collect();
    match coords.as_slice() {
        [Ok(row), Ok(col)] if (1..=GRID_SIZE).contains(row) && (1..=GRID_SIZE).contains(col) => {
            Input::Toggle {
                row: row - 1,
                col: col - 1,
            }
        }
        _ => Input::Invalid(format!(
            "enter a row and column between 1 and {GRID_SIZE} (e.g. \"2 4\"), or q to quit"
        )),
    }
}

fn fit(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(CELL_WIDTH - 1).collect();
        short.push('~');
        short
    }
}

/// Renders the card with marks. Cells on the winning line are flagged `#`,
/// other marked cells `x`.
fn render(title: &str, board: &PlayerBoard) -> String {
    let win_cells = board.winning_line().map(WinLine::cells);
    let on_win_line = |row, col| win_cells.is_some_and(|cells| cells.contains(&(row, col)));

    let rule = format!("   +{}", format!("{}+", "-".repeat(CELL_WIDTH + 3)).repeat(GRID_SIZE));
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");
    let _ = write!(out, "    ");
    for col in 1..=GRID_SIZE {
        let _ = write!(out, "{col:^width$} ", width = CELL_WIDTH + 3);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");

    for (row, cells) in board.card().rows().enumerate() {
        let _ = write!(out, "{:>2} |", row + 1);
        for (col, text) in cells.iter().enumerate() {
            let flag = if on_win_line(row, col) {
                '#'
            } else if board.marks().is_marked(row, col) {
                'x'
            } else {
                ' '
            };
            let _ = write!(out, "{flag} {:<width$} |", fit(text), width = CELL_WIDTH);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
    }
    out
}

/// Runs the interactive loop on stdin until the player quits or input ends.
pub async fn play(title: &str, card: Card) -> anyhow::Result<()> {
    let mut board = PlayerBoard::new(card);
    println!("{}", render(title, &board));
    println!("Type \"<row> <col>\" to mark a square, q to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Quit => break,
            Input::Redraw => {}
            Input::Invalid(hint) => {
                println!("{hint}");
                continue;
            }
            Input::Toggle { row, col } => {
                let outcome = board.toggle(row, col)?;
                for event in outcome.events() {
                    match event {
                        BoardEvent::SquareToggled { row, col, marked } => {
                            tracing::debug!(row, col, marked, "square toggled");
                        }
                        BoardEvent::LineCompleted(line) => {
                            println!("*** BINGO! ({line}) ***");
                        }
                    }
                }
            }
        }
        println!("{}", render(title, &board));
    }
    Ok(())
}
