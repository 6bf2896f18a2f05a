use clap::Parser;
use gridlock::engine::Game;
use gridlock::solver::{scramble, solve_bfs};
use gridlock::utils::{board_from_lines, goal_from_lines, render_with_cars};
use std::fs;
use std::path::PathBuf;

const CLASSIC_BOARD: [&str; 5] = [
    ".....", //
    "...v.", //
    "hh.v.", //
    ".....", //
    ".....",
];

const CLASSIC_GOAL: [&str; 5] = [
    ".....", //
    ".....", //
    "...hh", //
    ".....", //
    ".....",
];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of unit moves to search
    #[clap(short, long, default_value_t = 25)]
    max_depth: usize,

    /// Scramble the starting board with this many random moves first
    #[clap(long)]
    scramble: Option<u32>,

    /// Seed for the scramble random walk
    #[clap(long, default_value_t = 7)]
    seed: u64,

    /// Path to the goal file (a grid containing exactly the target span)
    #[clap(short, long)]
    goal_file: Option<PathBuf>,

    /// Path to the board file (one row of '.', 'h', 'v' markers per line)
    board_file: Option<PathBuf>,
}

fn read_grid_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    Ok(content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn load_game(args: &Args) -> Result<Game, String> {
    let board = match &args.board_file {
        Some(path) => {
            let lines = read_grid_file(path)?;
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            board_from_lines(&refs).map_err(|e| format!("Invalid board format: {}", e))?
        }
        None => board_from_lines(&CLASSIC_BOARD).expect("built-in board is well-formed"),
    };
    let goal = match &args.goal_file {
        Some(path) => {
            let lines = read_grid_file(path)?;
            let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
            goal_from_lines(&refs).map_err(|e| format!("Invalid goal format: {}", e))?
        }
        None => goal_from_lines(&CLASSIC_GOAL).expect("built-in goal is well-formed"),
    };
    Game::new(board, goal).map_err(|e| format!("Invalid puzzle: {}", e))
}

fn main() {
    let args = Args::parse();

    let mut game = load_game(&args).expect("Failed to load the puzzle");
    if let Some(steps) = args.scramble {
        game = scramble(&game, steps, args.seed);
        println!("Scrambled the board with {} random moves (seed {}).\n", steps, args.seed);
    }

    println!("Initial board state:");
    println!("{}", render_with_cars(game.board(), game.cars()));
    println!(
        "Searching for a solution of at most {} moves...\n",
        args.max_depth
    );

    if let Some(solution) = solve_bfs(&game, args.max_depth) {
        println!("Solution found:\n");
        println!("Moves ({}):", solution.moves.len());
        if solution.moves.is_empty() {
            println!("  Already solved, no moves needed.");
        } else {
            for (i, step) in solution.moves.iter().enumerate() {
                println!("  Move {}: car {} {}", i + 1, step.car + 1, step.direction);
            }
        }

        let mut replay = game.clone();
        replay.refresh();
        for step in &solution.moves {
            replay
                .move_car(step.car, step.direction, 1)
                .expect("solution moves replay cleanly");
            replay.refresh();
        }
        println!("\nFinal board state:");
        println!("{}", render_with_cars(replay.board(), replay.cars()));
    } else {
        println!("No solution within {} moves.\n", args.max_depth);
    }
}
