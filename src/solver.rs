use crate::engine::{Direction, Game};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashSet, VecDeque};

const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// A single step of a solution: slide one car one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    /// 0-based index into the car list scanned from the board this step is
    /// applied to. Replaying a solution requires `refresh()` between moves.
    pub car: usize,
    pub direction: Direction,
}

/// Represents a solution found by the solver.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Sequence of unit moves from the starting board to a solved board.
    /// Empty if the starting board was already solved.
    pub moves: Vec<PlannedMove>,
}

/// Solves the puzzle with breadth-first search over board states, up to
/// `max_depth` unit moves.
///
/// Multi-cell slides are explored as repeated unit moves, so the first
/// solution found is the shortest in unit moves. Boards already seen are
/// pruned with a visited set. Returns `None` if no solved board is
/// reachable within the depth limit.
pub fn solve_bfs(initial_game: &Game, max_depth: usize) -> Option<Solution> {
    if initial_game.is_solved() {
        return Some(Solution { moves: Vec::new() });
    }

    let mut start = initial_game.clone();
    start.refresh();

    let mut visited_states = HashSet::new();
    visited_states.insert(start.board().clone());

    let mut queue = VecDeque::new();
    queue.push_back((start, Vec::new()));

    while let Some((state, path)) = queue.pop_front() {
        if path.len() >= max_depth {
            continue;
        }

        for car in 0..state.cars().len() {
            for direction in ALL_DIRECTIONS {
                let mut next_state = state.clone();
                if next_state.move_car(car, direction, 1).is_err() {
                    continue;
                }
                next_state.refresh();

                if !visited_states.insert(next_state.board().clone()) {
                    continue;
                }

                let mut moves = path.clone();
                moves.push(PlannedMove { car, direction });

                if next_state.is_solved() {
                    return Some(Solution { moves });
                }
                queue.push_back((next_state, moves));
            }
        }
    }
    None
}

/// Scrambles a puzzle by applying `steps` random legal unit moves.
///
/// The walk is driven by a seeded RNG, so the same seed always produces
/// the same scrambled board. The returned game carries a fresh car list.
/// Scrambling a solved board yields a puzzle solvable in at most `steps`
/// unit moves.
pub fn scramble(game: &Game, steps: u32, seed: u64) -> Game {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut scrambled = game.clone();
    scrambled.refresh();

    for _ in 0..steps {
        let mut legal = Vec::new();
        for car in 0..scrambled.cars().len() {
            for direction in ALL_DIRECTIONS {
                if scrambled.can_move(car, direction, 1) {
                    legal.push((car, direction));
                }
            }
        }
        if legal.is_empty() {
            break;
        }

        let (car, direction) = legal[rng.gen_range(0..legal.len())];
        let applied = scrambled.move_car(car, direction, 1);
        assert!(applied.is_ok());
        scrambled.refresh();
    }
    scrambled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Game, Goal};
    use crate::utils::{board_from_lines, goal_from_lines};

    fn classic_game() -> Game {
        // Shortest solution is four unit moves: the vertical car up once,
        // then the horizontal car right three times.
        let board = board_from_lines(&[
            ".....", //
            "...v.", //
            "hh.v.", //
            ".....", //
            ".....",
        ])
        .unwrap();
        let goal = goal_from_lines(&[
            ".....", //
            ".....", //
            "...hh", //
            ".....", //
            ".....",
        ])
        .unwrap();
        Game::new(board, goal).unwrap()
    }

    fn replay(game: &Game, solution: &Solution) -> Game {
        let mut state = game.clone();
        state.refresh();
        for step in &solution.moves {
            state
                .move_car(step.car, step.direction, 1)
                .expect("solution must replay cleanly");
            state.refresh();
        }
        state
    }

    #[test]
    fn test_solve_already_solved() {
        let board = board_from_lines(&[
            "...", //
            "hh.", //
            "...",
        ])
        .unwrap();
        let goal = Goal::from_board(&board).unwrap();
        let game = Game::new(board, goal).unwrap();

        let solution = solve_bfs(&game, 5).unwrap();
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn test_solve_classic_shortest() {
        let game = classic_game();
        let solution = solve_bfs(&game, 10).unwrap();
        assert_eq!(solution.moves.len(), 4);
        assert!(replay(&game, &solution).is_solved());
    }

    #[test]
    fn test_solve_respects_depth_limit() {
        let game = classic_game();
        assert!(solve_bfs(&game, 3).is_none());
        assert!(solve_bfs(&game, 4).is_some());
    }

    #[test]
    fn test_solve_unreachable_goal() {
        // A horizontal car can never change rows, so a goal on another row
        // is unreachable no matter the depth.
        let board = board_from_lines(&[
            ".....", //
            ".....", //
            ".....", //
            ".....", //
            "...hh",
        ])
        .unwrap();
        let goal = goal_from_lines(&[
            ".....", //
            ".....", //
            "...hh", //
            ".....", //
            ".....",
        ])
        .unwrap();
        let game = Game::new(board, goal).unwrap();
        assert!(solve_bfs(&game, 30).is_none());
    }

    #[test]
    fn test_scramble_is_deterministic() {
        let game = classic_game();
        let a = scramble(&game, 8, 99);
        let b = scramble(&game, 8, 99);
        assert_eq!(a.board(), b.board(), "same seed must scramble identically");
    }

    #[test]
    fn test_scramble_zero_steps_is_identity() {
        let game = classic_game();
        let scrambled = scramble(&game, 0, 1);
        assert_eq!(scrambled.board(), game.board());
    }

    #[test]
    fn test_scramble_preserves_board_validity() {
        let game = classic_game();
        let scrambled = scramble(&game, 12, 7);
        let cars = scrambled.board().validate_cars().unwrap();
        assert_eq!(cars.len(), game.cars().len());
    }

    #[test]
    fn test_scrambled_solved_board_resolves_within_steps() {
        let board = board_from_lines(&[
            "v....", //
            "v....", //
            "...hh", //
            ".....", //
            ".....",
        ])
        .unwrap();
        let goal = goal_from_lines(&[
            ".....", //
            ".....", //
            "...hh", //
            ".....", //
            ".....",
        ])
        .unwrap();
        let game = Game::new(board, goal).unwrap();
        assert!(game.is_solved());

        let scrambled = scramble(&game, 6, 42);
        let solution = solve_bfs(&scrambled, 6).unwrap();
        assert!(solution.moves.len() <= 6);
        assert!(replay(&scrambled, &solution).is_solved());
    }
}
