//! Core move engine for the sliding-car puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Marker`: Represents the raw per-cell occupancy markers on the board.
//! - `Board`: Represents the grid and includes methods for cell access,
//!   car reconstruction (flood fill over same-marker cells), and span
//!   validation.
//! - `Car`: A straight run of contiguous cells reconstructed from markers.
//! - `Goal`: The target footprint the designated car must cover.
//! - `Game`: Owns the board and the cached car list, validates and applies
//!   moves, and detects the solved condition.
use std::fmt;
use thiserror::Error;

/// The default board dimension. The classic puzzle is played on a 5x5 grid.
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// Represents the raw content of a single cell on the board.
///
/// Occupied cells carry the orientation of the car covering them; car
/// identity is positional and only exists in a scanned car list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Represents an empty cell.
    Empty,
    /// Represents a cell covered by a horizontally oriented car.
    Horizontal,
    /// Represents a cell covered by a vertically oriented car.
    Vertical,
}

impl Marker {
    /// Converts the marker to its character representation.
    ///
    /// This is used for text-based display and serialization of boards.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlock::engine::Marker;
    /// assert_eq!(Marker::Horizontal.to_char(), 'h');
    /// assert_eq!(Marker::Empty.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Marker::Empty => '.',
            Marker::Horizontal => 'h',
            Marker::Vertical => 'v',
        }
    }

    /// The orientation implied by this marker, or `None` for an empty cell.
    pub fn orientation(&self) -> Option<Orientation> {
        match self {
            Marker::Empty => None,
            Marker::Horizontal => Some(Orientation::Horizontal),
            Marker::Vertical => Some(Orientation::Vertical),
        }
    }
}

/// The axis a car is aligned with; a car may only slide along this axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The marker written into cells covered by a car of this orientation.
    pub fn marker(&self) -> Marker {
        match self {
            Orientation::Horizontal => Marker::Horizontal,
            Orientation::Vertical => Marker::Vertical,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        })
    }
}

/// A direction a car can be asked to slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Whether this direction runs along the given orientation's axis.
    /// Horizontal cars only accept left/right, vertical cars only up/down.
    pub fn is_along(&self, orientation: Orientation) -> bool {
        match self {
            Direction::Up | Direction::Down => orientation == Orientation::Vertical,
            Direction::Left | Direction::Right => orientation == Orientation::Horizontal,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// An error describing a board whose markers do not form a legal puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row} has {len} cells (expected {dim})")]
    NotSquare { row: usize, len: usize, dim: usize },

    #[error("car group starting at ({row}, {col}) is not a straight contiguous span")]
    MalformedSpan { row: usize, col: usize },

    #[error("goal grid must contain exactly one car, found {count}")]
    GoalCarCount { count: usize },
}

/// An error describing a rejected move. Rejections are reported to the
/// caller and never mutate the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("car index {index} is out of range ({count} cars on the board)")]
    InvalidCarIndex { index: usize, count: usize },

    #[error("a {orientation} car cannot move {direction}")]
    MisalignedDirection {
        orientation: Orientation,
        direction: Direction,
    },

    #[error("the car would leave the board")]
    OutOfBounds,

    #[error("the destination cell ({row}, {col}) is occupied by another car")]
    BlockedByCar { row: usize, col: usize },
}

/// The cells covered by a straight span between two bounding coordinates.
fn span_cells(
    start: (usize, usize),
    end: (usize, usize),
    orientation: Orientation,
) -> Vec<(usize, usize)> {
    match orientation {
        Orientation::Horizontal => (start.1..=end.1).map(|c| (start.0, c)).collect(),
        Orientation::Vertical => (start.0..=end.0).map(|r| (r, start.1)).collect(),
    }
}

/// The cell `distance` steps away in `direction`, or `None` if it would
/// leave the `dim` x `dim` board.
fn shifted_cell(
    cell: (usize, usize),
    direction: Direction,
    distance: usize,
    dim: usize,
) -> Option<(usize, usize)> {
    let (row, col) = cell;
    let (row, col) = match direction {
        Direction::Up => (row.checked_sub(distance)?, col),
        Direction::Down => (row.checked_add(distance)?, col),
        Direction::Left => (row, col.checked_sub(distance)?),
        Direction::Right => (row, col.checked_add(distance)?),
    };
    (row < dim && col < dim).then_some((row, col))
}

/// Represents a single car reconstructed from the board markers.
///
/// A car is a value object: it has no identity beyond its index in the car
/// list it was scanned into, and that index may change across rescans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Car {
    start: (usize, usize),
    end: (usize, usize),
    orientation: Orientation,
}

impl Car {
    /// The (row, col) of the car's topmost/leftmost cell.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// The (row, col) of the car's bottommost/rightmost cell.
    pub fn end(&self) -> (usize, usize) {
        self.end
    }

    /// The axis this car is aligned with and may slide along.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The number of cells the car covers, derived from its span.
    pub fn length(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.end.1 - self.start.1 + 1,
            Orientation::Vertical => self.end.0 - self.start.0 + 1,
        }
    }

    /// The cells currently covered by this car, in span order.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        span_cells(self.start, self.end, self.orientation)
    }

    /// Whether `cell` lies inside this car's current footprint.
    pub fn covers(&self, cell: (usize, usize)) -> bool {
        let (row, col) = cell;
        self.start.0 <= row && row <= self.end.0 && self.start.1 <= col && col <= self.end.1
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} car of length {} at ({}, {})..({}, {})",
            self.orientation,
            self.length(),
            self.start.0,
            self.start.1,
            self.end.0,
            self.end.1
        )
    }
}

/// Represents the board as a square grid of `Marker`s.
///
/// The grid is the single source of truth for occupancy; scanned car lists
/// are derived, cached views of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    dim: usize,
    grid: Vec<Vec<Marker>>,
}

impl Board {
    /// Creates a new empty board of the given dimension.
    ///
    /// # Examples
    /// ```
    /// use gridlock::engine::{Board, Marker, DEFAULT_BOARD_SIZE};
    /// let board = Board::new_empty(DEFAULT_BOARD_SIZE);
    /// assert_eq!(board.get(0, 0), Marker::Empty);
    /// ```
    pub fn new_empty(dim: usize) -> Self {
        Board {
            dim,
            grid: vec![vec![Marker::Empty; dim]; dim],
        }
    }

    /// Creates a board from a caller-supplied grid of markers.
    ///
    /// The grid must be square: every row must have as many cells as there
    /// are rows. No car-level validation happens here; see
    /// [`Board::validate_cars`].
    pub fn from_grid(grid: Vec<Vec<Marker>>) -> Result<Self, GridError> {
        let dim = grid.len();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != dim {
                return Err(GridError::NotSquare {
                    row,
                    len: cells.len(),
                    dim,
                });
            }
        }
        Ok(Board { dim, grid })
    }

    /// The board dimension `N` of the `N` x `N` grid.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns the marker at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn get(&self, r: usize, c: usize) -> Marker {
        self.grid[r][c]
    }

    /// Sets the marker at row `r`, column `c`.
    ///
    /// Direct mutation can break the straight-span invariant; the move
    /// engine only writes through validated moves.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board.
    pub fn set(&mut self, r: usize, c: usize, marker: Marker) {
        self.grid[r][c] = marker;
    }

    /// Groups connected same-marker cells, one group per flood fill, in
    /// row-major discovery order. Each group's first cell is its discovery
    /// cell.
    fn scan_groups(&self) -> Vec<(Marker, Vec<(usize, usize)>)> {
        let mut groups = Vec::new();
        let mut visited = vec![vec![false; self.dim]; self.dim];

        for r in 0..self.dim {
            for c in 0..self.dim {
                if self.grid[r][c] == Marker::Empty || visited[r][c] {
                    continue;
                }
                let kind = self.grid[r][c];

                // Iterative flood fill over 4-connected neighbours of the
                // same marker type.
                let mut group = Vec::new();
                let mut stack = vec![(r, c)];
                visited[r][c] = true;

                while let Some((curr_r, curr_c)) = stack.pop() {
                    group.push((curr_r, curr_c));

                    let dr = [-1isize, 1, 0, 0];
                    let dc = [0isize, 0, -1, 1];
                    for i in 0..4 {
                        let nr = curr_r as isize + dr[i];
                        let nc = curr_c as isize + dc[i];
                        if nr < 0 || nr >= self.dim as isize || nc < 0 || nc >= self.dim as isize {
                            continue;
                        }
                        let (nr, nc) = (nr as usize, nc as usize);
                        if !visited[nr][nc] && self.grid[nr][nc] == kind {
                            visited[nr][nc] = true;
                            stack.push((nr, nc));
                        }
                    }
                }

                groups.push((kind, group));
            }
        }
        groups
    }

    /// Scans the board and reconstructs one `Car` per connected group of
    /// same-marker cells, in row-major discovery order.
    ///
    /// The car's `start` is the (min row, min col) and its `end` the
    /// (max row, max col) over the group; its orientation comes from the
    /// marker type. The scan is best-effort: it does not verify that a
    /// group forms a straight contiguous span, so a malformed board
    /// degrades to a wrong-but-non-crashing car list. Use
    /// [`Board::validate_cars`] to enforce the invariant.
    pub fn find_cars(&self) -> Vec<Car> {
        let mut cars = Vec::new();
        for (kind, group) in self.scan_groups() {
            let Some(orientation) = kind.orientation() else {
                continue;
            };
            let (mut start, mut end) = (group[0], group[0]);
            for &(gr, gc) in &group {
                start.0 = start.0.min(gr);
                start.1 = start.1.min(gc);
                end.0 = end.0.max(gr);
                end.1 = end.1.max(gc);
            }
            cars.push(Car {
                start,
                end,
                orientation,
            });
        }
        cars
    }

    /// Scans the board and checks that every group of connected same-marker
    /// cells forms a straight contiguous span along its marker's axis.
    ///
    /// Returns the car list on success. A bent group, or two touching cars
    /// of the same orientation (indistinguishable in the marker grid),
    /// yields [`GridError::MalformedSpan`] naming the group's discovery
    /// cell.
    pub fn validate_cars(&self) -> Result<Vec<Car>, GridError> {
        let mut cars = Vec::new();
        for (kind, group) in self.scan_groups() {
            let Some(orientation) = kind.orientation() else {
                continue;
            };
            let (mut start, mut end) = (group[0], group[0]);
            for &(gr, gc) in &group {
                start.0 = start.0.min(gr);
                start.1 = start.1.min(gc);
                end.0 = end.0.max(gr);
                end.1 = end.1.max(gc);
            }
            let straight = match orientation {
                Orientation::Horizontal => {
                    start.0 == end.0 && group.len() == end.1 - start.1 + 1
                }
                Orientation::Vertical => start.1 == end.1 && group.len() == end.0 - start.0 + 1,
            };
            if !straight {
                return Err(GridError::MalformedSpan {
                    row: group[0].0,
                    col: group[0].1,
                });
            }
            cars.push(Car {
                start,
                end,
                orientation,
            });
        }
        Ok(cars)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for marker in row {
                write!(f, "{}", marker.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The target footprint the designated car must cover for the puzzle to be
/// solved.
///
/// Goals are externally supplied configuration, never engine constants, so
/// the engine is reusable across puzzle instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goal {
    start: (usize, usize),
    end: (usize, usize),
    orientation: Orientation,
}

impl Goal {
    /// Creates a goal covering the straight span from `start` to `end`.
    ///
    /// The span must be aligned with `orientation` and ordered
    /// topmost/leftmost first.
    pub fn new(
        start: (usize, usize),
        end: (usize, usize),
        orientation: Orientation,
    ) -> Result<Self, GridError> {
        let straight = match orientation {
            Orientation::Horizontal => start.0 == end.0 && start.1 <= end.1,
            Orientation::Vertical => start.1 == end.1 && start.0 <= end.0,
        };
        if !straight {
            return Err(GridError::MalformedSpan {
                row: start.0,
                col: start.1,
            });
        }
        Ok(Goal {
            start,
            end,
            orientation,
        })
    }

    /// Derives a goal from a grid containing exactly the target car.
    ///
    /// This is the two-grid configuration form: the caller supplies a goal
    /// board whose single car marks the footprint to reach.
    pub fn from_board(board: &Board) -> Result<Self, GridError> {
        let cars = board.validate_cars()?;
        match cars.as_slice() {
            [car] => Ok(Goal {
                start: car.start(),
                end: car.end(),
                orientation: car.orientation(),
            }),
            _ => Err(GridError::GoalCarCount { count: cars.len() }),
        }
    }

    /// The (row, col) of the target span's topmost/leftmost cell.
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// The (row, col) of the target span's bottommost/rightmost cell.
    pub fn end(&self) -> (usize, usize) {
        self.end
    }

    /// The orientation the covering car must have.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The cells of the target span.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        span_cells(self.start, self.end, self.orientation)
    }

    /// Whether every target cell on `board` carries the goal orientation's
    /// marker. A pure read; target cells outside the board are never
    /// satisfied.
    pub fn is_satisfied_by(&self, board: &Board) -> bool {
        self.cells().into_iter().all(|(r, c)| {
            r < board.dim() && c < board.dim() && board.get(r, c) == self.orientation.marker()
        })
    }
}

/// A validated move: the car's current footprint, its destination
/// footprint, and the marker to rewrite.
struct MovePlan {
    from: Vec<(usize, usize)>,
    to: Vec<(usize, usize)>,
    marker: Marker,
}

/// Manages a puzzle instance: the board, the cached car list, and the goal.
///
/// The car list is rebuilt wholesale by [`Game::refresh`]; a successful
/// move mutates the grid directly and marks the list stale. Reads are legal
/// in either state, but callers that rely on car indices must refresh
/// before the next dependent operation.
///
/// # Examples
/// ```
/// use gridlock::engine::{Direction, Game, Goal, Orientation};
/// use gridlock::utils::board_from_lines;
///
/// let board = board_from_lines(&[
///     ".....",
///     "..v..",
///     "..v..",
///     ".....",
///     "...hh",
/// ]).unwrap();
/// let goal = Goal::new((2, 3), (2, 4), Orientation::Horizontal).unwrap();
/// let mut game = Game::new(board, goal).unwrap();
///
/// assert_eq!(game.cars().len(), 2);
/// assert!(game.move_car(0, Direction::Up, 1).is_ok());
/// game.refresh();
/// assert!(!game.is_solved());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    cars: Vec<Car>,
    goal: Goal,
    stale: bool,
}

impl Game {
    /// Creates a puzzle from a caller-supplied board and goal.
    ///
    /// The board is validated against the straight-contiguous-span
    /// invariant here, so every later scan can trust it. The initial car
    /// list is fresh.
    pub fn new(board: Board, goal: Goal) -> Result<Self, GridError> {
        let cars = board.validate_cars()?;
        Ok(Game {
            board,
            cars,
            goal,
            stale: false,
        })
    }

    /// Returns an immutable reference to the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the cached car list, which may be stale after a move.
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Returns the goal this puzzle is played towards.
    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    /// Whether the cached car list matches the current board contents.
    pub fn is_fresh(&self) -> bool {
        !self.stale
    }

    /// Rescans the board and replaces the cached car list.
    ///
    /// Car indices are only meaningful against the list produced by the
    /// most recent refresh; a move may renumber cars on the next scan.
    pub fn refresh(&mut self) {
        self.cars = self.board.find_cars();
        self.stale = false;
    }

    /// Validates a slide of `distance` cells without touching the board.
    fn plan_move(
        &self,
        index: usize,
        direction: Direction,
        distance: usize,
    ) -> Result<MovePlan, MoveError> {
        let count = self.cars.len();
        let car = *self
            .cars
            .get(index)
            .ok_or(MoveError::InvalidCarIndex { index, count })?;

        if !direction.is_along(car.orientation()) {
            return Err(MoveError::MisalignedDirection {
                orientation: car.orientation(),
                direction,
            });
        }

        let from = car.cells();
        let mut to = Vec::with_capacity(from.len());
        for &cell in &from {
            let dest = shifted_cell(cell, direction, distance, self.board.dim())
                .ok_or(MoveError::OutOfBounds)?;
            // Cells inside the car's own current footprint do not block it.
            if self.board.get(dest.0, dest.1) != Marker::Empty && !car.covers(dest) {
                return Err(MoveError::BlockedByCar {
                    row: dest.0,
                    col: dest.1,
                });
            }
            to.push(dest);
        }

        Ok(MovePlan {
            from,
            to,
            marker: car.orientation().marker(),
        })
    }

    /// Checks whether the car at `index` in the cached list can slide
    /// `distance` cells in `direction`, reporting the reason it cannot.
    ///
    /// Checked in order: index validity, direction/orientation alignment,
    /// board boundary, collision with other cars. Never mutates.
    pub fn check_move(
        &self,
        index: usize,
        direction: Direction,
        distance: usize,
    ) -> Result<(), MoveError> {
        self.plan_move(index, direction, distance).map(|_| ())
    }

    /// Convenience form of [`Game::check_move`] reduced to a yes/no answer.
    pub fn can_move(&self, index: usize, direction: Direction, distance: usize) -> bool {
        self.check_move(index, direction, distance).is_ok()
    }

    /// Slides the car at `index` by `distance` cells in `direction`.
    ///
    /// On rejection the board is left bit-for-bit unchanged and the reason
    /// is returned. On success the car's old footprint is snapshotted,
    /// cleared, and its marker written into every destination cell; the
    /// cached car list becomes stale until [`Game::refresh`] is called.
    /// A `distance` of zero is accepted and leaves the board unchanged.
    pub fn move_car(
        &mut self,
        index: usize,
        direction: Direction,
        distance: usize,
    ) -> Result<(), MoveError> {
        let plan = self.plan_move(index, direction, distance)?;

        // Clear the snapshotted footprint before writing the destination so
        // a car never collides with cells it is about to vacate.
        for &(r, c) in &plan.from {
            self.board.set(r, c, Marker::Empty);
        }
        for &(r, c) in &plan.to {
            self.board.set(r, c, plan.marker);
        }
        self.stale = true;
        Ok(())
    }

    /// Whether the goal span is fully covered by the designated marker.
    ///
    /// A pure read against the grid; legal in both fresh and stale states.
    pub fn is_solved(&self) -> bool {
        self.goal.is_satisfied_by(&self.board)
    }
}
