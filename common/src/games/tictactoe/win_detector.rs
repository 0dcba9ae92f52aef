use super::board::has_empty_cell;
use super::types::{Grid, Mark, Outcome, WinLine};

/// Rows, then columns, then diagonals. Scan order decides ties.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine::new([0, 1, 2]),
    WinLine::new([3, 4, 5]),
    WinLine::new([6, 7, 8]),
    WinLine::new([0, 3, 6]),
    WinLine::new([1, 4, 7]),
    WinLine::new([2, 5, 8]),
    WinLine::new([0, 4, 8]),
    WinLine::new([2, 4, 6]),
];

pub fn check_win(grid: &Grid) -> Outcome {
    if let Some((mark, _)) = check_win_with_line(grid) {
        return Outcome::Win(mark);
    }

    if has_empty_cell(grid) {
        Outcome::Ongoing
    } else {
        Outcome::Draw
    }
}

pub fn winning_line(grid: &Grid) -> Option<WinLine> {
    check_win_with_line(grid).map(|(_, line)| line)
}

/// First complete line in [`WIN_LINES`] order, if any.
pub fn check_win_with_line(grid: &Grid) -> Option<(Mark, WinLine)> {
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells;
        match grid.get(a) {
            Some(mark) if grid.get(b) == Some(mark) && grid.get(c) == Some(mark) => {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}
