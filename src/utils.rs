use crate::engine::{Board, Car, Goal, GridError, Marker};
use thiserror::Error;

/// An error raised while parsing a textual board or goal description.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized marker '{marker}' at row {row} col {col}")]
    UnrecognizedMarker { marker: char, row: usize, col: usize },

    #[error("row {row} has {len} markers (expected {dim})")]
    LineLength { row: usize, len: usize, dim: usize },

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parses an array of string slices into a `Board`.
///
/// Each string slice represents one row, starting from row 0; the board
/// dimension is the number of rows, and every row must have exactly that
/// many characters.
///
/// Valid characters are:
/// - `.`: an empty cell
/// - `h`: a cell of a horizontally oriented car
/// - `v`: a cell of a vertically oriented car
///
/// Any other character results in an error. The parsed board is not
/// validated against the straight-span invariant; that happens when a
/// `Game` or `Goal` is built from it.
///
/// # Examples
/// ```
/// use gridlock::engine::Marker;
/// use gridlock::utils::board_from_lines;
///
/// let board = board_from_lines(&[
///     "v..",
///     "v..",
///     ".hh",
/// ]).unwrap();
/// assert_eq!(board.dim(), 3);
/// assert_eq!(board.get(0, 0), Marker::Vertical);
/// assert_eq!(board.get(2, 1), Marker::Horizontal);
///
/// assert!(board_from_lines(&["x"]).is_err());
/// ```
pub fn board_from_lines(lines: &[&str]) -> Result<Board, ParseError> {
    let dim = lines.len();
    let mut grid = vec![vec![Marker::Empty; dim]; dim];

    for (r, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != dim {
            return Err(ParseError::LineLength { row: r, len, dim });
        }
        for (c, ch) in line.chars().enumerate() {
            grid[r][c] = match ch {
                '.' => Marker::Empty,
                'h' => Marker::Horizontal,
                'v' => Marker::Vertical,
                _ => {
                    return Err(ParseError::UnrecognizedMarker {
                        marker: ch,
                        row: r,
                        col: c,
                    })
                }
            };
        }
    }
    Ok(Board::from_grid(grid)?)
}

/// Parses a goal grid: a board containing exactly one car whose footprint
/// is the target span.
pub fn goal_from_lines(lines: &[&str]) -> Result<Goal, ParseError> {
    let board = board_from_lines(lines)?;
    Ok(Goal::from_board(&board)?)
}

/// Renders the board with each car shown as its 1-based index in `cars`.
///
/// The output carries row and column headers. Cells not covered by any car
/// in the list render as `.`, so the caller should pass a freshly scanned
/// list.
pub fn render_with_cars(board: &Board, cars: &[Car]) -> String {
    let dim = board.dim();
    let mut tokens = vec![vec![None; dim]; dim];
    for (n, car) in cars.iter().enumerate() {
        for (r, c) in car.cells() {
            tokens[r][c] = Some(n + 1);
        }
    }

    let mut output = String::new();
    output.push_str("  ");
    for c_idx in 0..dim {
        output.push_str(&format!("{:<2}", c_idx));
    }
    output.push('\n');

    for (r_idx, row) in tokens.iter().enumerate() {
        output.push_str(&format!("{:<2}", r_idx));
        for token in row {
            match token {
                Some(n) => output.push_str(&format!("{:<2}", n)),
                None => output.push_str(". "),
            }
        }
        output.push('\n');
    }
    output
}
