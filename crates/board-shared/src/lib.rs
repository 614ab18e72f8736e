#![no_std]

/// The eight compass directions as (row delta, column delta).
pub const COMPASS: [(i32, i32); 8] = [
    (-1, 0), (-1, 1), (0, 1), (1, 1),
    (1, 0), (1, -1), (0, -1), (-1, -1),
];

/// The four line axes used by N-in-a-row scans: horizontal, vertical and both diagonals.
pub const LINE_AXES: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Moves one step from `(row, col)` along `(dr, dc)`, returning `None` when leaving the grid.
#[inline]
pub fn step(row: usize, col: usize, dr: i32, dc: i32, width: usize, height: usize) -> Option<(usize, usize)> {
    let r = row as i32 + dr;
    let c = col as i32 + dc;
    if r < 0 || c < 0 || r >= height as i32 || c >= width as i32 {
        None
    } else {
        Some((r as usize, c as usize))
    }
}

/// Checks for a win anywhere on a grid-based board (Tic-Tac-Toe, Connect Four, ...)
///
/// # Arguments
/// * `board` - The board data as a flat row-major slice
/// * `width` - Board width
/// * `height` - Board height
/// * `player` - The cell value to look for
/// * `line_size` - Number of consecutive cells needed to win
pub fn check_line_win<T: Copy + PartialEq>(board: &[T], width: usize, height: usize, player: T, line_size: usize) -> bool {
    for row in 0..height {
        for col in 0..width {
            if board[row * width + col] == player
                && line_through(board, width, height, row, col, line_size)
            {
                return true;
            }
        }
    }
    false
}

/// Returns true if the cell at `(row, col)` is part of a run of at least
/// `line_size` equal cells along any of the four line axes.
pub fn line_through<T: Copy + PartialEq>(board: &[T], width: usize, height: usize, row: usize, col: usize, line_size: usize) -> bool {
    let player = board[row * width + col];
    for &(dr, dc) in LINE_AXES.iter() {
        let mut count = 1;
        for &sign in [1i32, -1].iter() {
            let (mut r, mut c) = (row, col);
            while let Some((nr, nc)) = step(r, c, dr * sign, dc * sign, width, height) {
                if board[nr * width + nc] != player {
                    break;
                }
                count += 1;
                r = nr;
                c = nc;
            }
        }
        if count >= line_size {
            return true;
        }
    }
    false
}

/// The von Neumann neighbourhood of a cell (up, down, left, right), clipped at the edges.
pub fn orthogonal_neighbors(row: usize, col: usize, width: usize, height: usize) -> [Option<(usize, usize)>; 4] {
    [
        step(row, col, -1, 0, width, height),
        step(row, col, 1, 0, width, height),
        step(row, col, 0, -1, width, height),
        step(row, col, 0, 1, width, height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let board = [
            0, 0, 0, 0,
            1, 1, 1, 0,
            0, 0, 0, 0,
        ];
        assert!(check_line_win(&board, 4, 3, 1, 3));
        assert!(!check_line_win(&board, 4, 3, 1, 4));
    }

    #[test]
    fn test_anti_diagonal_through_cell() {
        let board = [
            0, 0, 2,
            0, 2, 0,
            2, 0, 0,
        ];
        assert!(line_through(&board, 3, 3, 1, 1, 3));
        assert!(line_through(&board, 3, 3, 2, 0, 3));
    }

    #[test]
    fn test_line_size_larger_than_board() {
        let board = [1, 1, 1];
        assert!(!check_line_win(&board, 3, 1, 1, 4));
    }

    #[test]
    fn test_corner_has_two_neighbors() {
        let n = orthogonal_neighbors(0, 0, 5, 5);
        assert_eq!(n.iter().flatten().count(), 2);
        let n = orthogonal_neighbors(2, 2, 5, 5);
        assert_eq!(n.iter().flatten().count(), 4);
    }
}
