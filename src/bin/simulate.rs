// Random self-play for Get the Gold.
//
// Drives full games through the public engine API with randomly chosen
// legal actions and reports winners and turn counts.

use clap::Parser;
use itertools::iproduct;
use rand::prelude::*;

use get_the_gold::game::types::{
    PalisadeState, Phase, PlayerId, Tile, AVAILABLE_RACES, BOARD_COLS, BOARD_ROWS, MAX_ARMY_SIZE,
};
use get_the_gold::game::GameEngine;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Random self-play for Get the Gold")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    num_games: u32,

    /// Number of players per game (2-4)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Log every action
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !(2..=4).contains(&args.players) {
        eprintln!("players must be between 2 and 4");
        std::process::exit(2);
    }

    println!("Get the Gold simulation");
    println!("  players:  {}", args.players);
    println!("  games:    {}", args.num_games);

    let mut rng = thread_rng();
    let mut wins: Vec<(PlayerId, u32)> = (1..=args.players)
        .map(|i| (format!("player-{i}"), 0))
        .collect();
    let mut total_turns = 0u64;

    for game_num in 0..args.num_games {
        let (winner, turns) = simulate_single_game(args.players, &mut rng, args.verbose);
        total_turns += u64::from(turns);
        if let Some(slot) = wins.iter_mut().find(|(id, _)| *id == winner) {
            slot.1 += 1;
        }
        if args.verbose {
            println!("Game {}: {winner} won after {turns} turns", game_num + 1);
        }
    }

    println!("\nResults over {} game(s):", args.num_games);
    for (player, count) in &wins {
        println!("  {player}: {count} win(s)");
    }
    if args.num_games > 0 {
        println!(
            "  average game length: {:.1} turns",
            total_turns as f64 / f64::from(args.num_games)
        );
    }
}

fn simulate_single_game(players: usize, rng: &mut ThreadRng, verbose: bool) -> (PlayerId, u32) {
    let mut engine = GameEngine::new();

    for i in 0..players {
        let id = format!("player-{}", i + 1);
        engine.join_game(&id).expect("lobby has room");
        engine
            .set_race(&id, AVAILABLE_RACES[i])
            .expect("races are distinct");
        engine.signal_ready(&id).expect("player just joined");
    }

    let mut turns = 0u32;
    loop {
        let state = engine.game_state();
        if state.current_state == Phase::GameOver {
            let winner = state.winner.expect("finished game names a winner");
            return (winner, turns);
        }
        let current = state
            .current_player
            .clone()
            .expect("running game has a current player");

        turns += 1;

        // Gather every legal move, weight token placement and wall
        // placement equally, and fall back to passing.
        let open_tiles: Vec<(usize, usize)> = iproduct!(0..BOARD_ROWS, 0..BOARD_COLS)
            .filter(|&(r, c)| matches!(state.tiles[r][c], Tile::Empty))
            .collect();
        let sizes: Vec<u8> = (1..=MAX_ARMY_SIZE)
            .filter(|&size| state.players[&current].tokens[usize::from(size - 1)] > 0)
            .collect();
        let open_walls: Vec<&String> = state
            .palisades
            .iter()
            .filter(|(_, &slot)| slot == PalisadeState::Unplaced)
            .map(|(id, _)| id)
            .collect();

        let can_place_token = !open_tiles.is_empty() && !sizes.is_empty();
        let place_token = can_place_token && (open_walls.is_empty() || rng.gen_bool(0.5));

        if place_token {
            let &(row, col) = open_tiles.choose(rng).expect("checked non-empty");
            let &size = sizes.choose(rng).expect("checked non-empty");
            engine
                .add_token(&current, row, col, size)
                .expect("move was drawn from the legal set");
            if verbose {
                println!("  {current} places size-{size} army at ({row}, {col})");
            }
        } else if let Some(id) = open_walls.choose(rng) {
            engine
                .place_palisade(&current, id)
                .expect("wall was drawn from the legal set");
            if verbose {
                println!("  {current} raises palisade {id}");
            }
        } else {
            engine.end_turn(&current).expect("passing is always legal");
            if verbose {
                println!("  {current} passes");
            }
        }
    }
}
