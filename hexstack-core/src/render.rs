//! Plain-text rendering of a board
//!
//! Each board row takes two text lines: even columns print on the first,
//! odd columns (which sit half a cell lower) on the second.

use crate::board::Board;
use crate::geometry::Hex;

const CELL_WIDTH: usize = 4;

/// ANSI foreground colours cycled across the roster
const PLAYER_COLORS: [u8; 6] = [31, 34, 32, 33, 35, 36];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self { color: false }
    }
}

/// Letter used for the player at roster position `index`
fn player_letter(index: Option<usize>) -> char {
    match index {
        Some(i) if i < 26 => (b'a' + i as u8) as char,
        _ => '?',
    }
}

fn render_cell(board: &Board, hex: Hex, options: &RenderOptions) -> String {
    let Some(tile) = board.get(hex) else {
        return format!("{:<width$}", " .", width = CELL_WIDTH);
    };
    let index = board.players().iter().position(|p| *p == tile.owner);
    let text = format!("{}{}", player_letter(index), tile.height);
    let padded = format!("{:<width$}", text, width = CELL_WIDTH);
    match (options.color, index) {
        (true, Some(i)) => {
            let code = PLAYER_COLORS[i % PLAYER_COLORS.len()];
            format!("\x1b[{}m{}\x1b[0m", code, padded)
        }
        _ => padded,
    }
}

/// Render the grid followed by a line of gains in roster order
pub fn render_board(board: &Board, options: &RenderOptions) -> String {
    let mut out = String::new();

    match board.min_max_positions() {
        Ok(bounds) => {
            for y in bounds.min_y..=bounds.max_y {
                for odd in [false, true] {
                    let mut line = String::new();
                    for x in bounds.min_x..=bounds.max_x {
                        let hex = Hex::new(x, y);
                        if hex.is_even_column() != odd {
                            line.push_str(&render_cell(board, hex, options));
                        } else {
                            line.push_str(&" ".repeat(CELL_WIDTH));
                        }
                    }
                    out.push_str(line.trim_end());
                    out.push('\n');
                }
            }
        }
        Err(_) => out.push_str("(empty board)\n"),
    }

    let gains: Vec<String> = board
        .gains_in_order()
        .into_iter()
        .enumerate()
        .map(|(i, (player, gain))| format!("{}:{}={}", player_letter(Some(i)), player, gain))
        .collect();
    out.push_str(&gains.join(" "));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let mut board = Board::new(["red", "blue"]);
        board.place_tile(Hex::new(0, 0), "red", 2).unwrap();
        board.place_tile(Hex::new(1, 0), "blue", 1).unwrap();
        let text = render_board(&board, &RenderOptions::plain());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["a2", "    b1", "a:red=2 b:blue=1"]);
    }

    #[test]
    fn test_render_empty() {
        let board = Board::new(["red", "blue"]);
        let text = render_board(&board, &RenderOptions::default());
        assert_eq!(text, "(empty board)\na:red=0 b:blue=0\n");
    }

    #[test]
    fn test_render_color_and_gaps() {
        let mut board = Board::new(["red", "blue"]);
        board.place_tile(Hex::new(0, 0), "red", 1).unwrap();
        board.place_tile(Hex::new(2, 0), "blue", 3).unwrap();
        let text = render_board(&board, &RenderOptions::default());
        assert!(text.contains("\x1b[31ma1  \x1b[0m"));
        assert!(text.contains("\x1b[34mb3  \x1b[0m"));
        let plain = render_board(&board, &RenderOptions::plain());
        assert_eq!(plain.lines().next(), Some("a1      b3"));
        assert_eq!(plain.lines().nth(1), Some("     ."));
    }
}
