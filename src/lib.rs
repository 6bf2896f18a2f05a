//! # Gridlock
//!
//! This library provides the core rules of a sliding-car puzzle: rectangular
//! cars occupy straight runs of cells on a square grid and may only slide
//! along their own axis, without overlapping other cars or leaving the board.
//! The puzzle is won when the target span of cells is covered by a car of the
//! designated orientation.
//!
//! It is used by two binaries:
//! - `play`: Allows interactive gameplay via the command line.
//! - `solve`: Takes a board and goal configuration, then searches for the
//!   shortest sequence of moves that solves the puzzle.
//!
//! ## Modules
//! - `engine`: Contains the board representation (`Board`), cell markers
//!   (`Marker`), car reconstruction from raw markers, and the move engine
//!   (`Game`) with full collision and boundary validation.
//! - `solver`: Provides breadth-first search over board states (`solve_bfs`)
//!   and a deterministic scrambler for puzzle generation.
//! - `utils`: Provides utility functions for parsing boards and goals from
//!   text and for rendering a board with numbered cars.

pub mod engine;
pub mod solver;
pub mod utils;
