use gridlock::engine::{Direction, Game};
use gridlock::utils::{board_from_lines, goal_from_lines, render_with_cars};
use std::io::{self, Write};

// The classic starter puzzle: slide the horizontal car into the marked
// span on row 2 after clearing the vertical car out of its way.
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

fn parse_direction(word: &str) -> Option<Direction> {
    match word {
        "up" => Some(Direction::Up),
        "down" => Some(Direction::Down),
        "left" => Some(Direction::Left),
        "right" => Some(Direction::Right),
        _ => None,
    }
}

fn main() {
    let board = board_from_lines(&CLASSIC_BOARD).expect("built-in board is well-formed");
    let goal = goal_from_lines(&CLASSIC_GOAL).expect("built-in goal is well-formed");
    let mut game = Game::new(board, goal).expect("built-in board is well-formed");

    println!("Welcome to Gridlock!");
    println!(
        "Get a horizontal car onto cells ({}, {})..({}, {}).",
        game.goal().start().0,
        game.goal().start().1,
        game.goal().end().0,
        game.goal().end().1
    );

    let mut moves_made = 0u32;
    loop {
        println!("---------------------");
        println!("Moves: {}", moves_made);
        println!("{}", render_with_cars(game.board(), game.cars()));
        for (n, car) in game.cars().iter().enumerate() {
            println!("Car {}: {}", n + 1, car);
        }

        if game.is_solved() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED in {} moves! 🎉", moves_made);
            println!("---------------------");
            break;
        }

        print!("Enter your move (car direction [distance]), or 'q' to quit: ");
        io::stdout().flush().unwrap(); // Ensure prompt is shown before input

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Please try again.");
            continue;
        }

        let trimmed_input = input.trim();
        if trimmed_input == "q" {
            println!("Thanks for playing!");
            break;
        }

        let parts: Vec<&str> = trimmed_input.split_whitespace().collect();
        if parts.len() != 2 && parts.len() != 3 {
            println!("Invalid input format. Use 'car direction [distance]' or 'q'.");
            continue;
        }

        let Ok(car_display) = parts[0].parse::<usize>() else {
            println!("Invalid car: '{}' is not a number.", parts[0]);
            continue;
        };
        let Some(car) = car_display.checked_sub(1) else {
            println!("Invalid car: cars are numbered from 1.");
            continue;
        };
        let Some(direction) = parse_direction(parts[1]) else {
            println!(
                "Invalid direction '{}': use up, down, left, or right.",
                parts[1]
            );
            continue;
        };
        let distance = if parts.len() == 3 {
            match parts[2].parse::<usize>() {
                Ok(d) => d,
                Err(_) => {
                    println!("Invalid distance: '{}' is not a number.", parts[2]);
                    continue;
                }
            }
        } else {
            1
        };

        match game.move_car(car, direction, distance) {
            Ok(()) => {
                game.refresh();
                moves_made += 1;
            }
            Err(reason) => println!("Invalid move: {}.", reason),
        }
    }
}
