use std::collections::HashMap;
use std::error::Error;
use std::process;
use std::time::Instant;

use clap::Parser;

use whot::{Bot, COMPUTER, Game, HUMAN, Session, create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run many games of one bot against the computer and report win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on first-seat actions per game; games exceeding this are aborted
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Cards dealt to each player
    #[arg(long = "hand-size", default_value_t = whot::card::HAND_SIZE)]
    hand_size: usize,

    /// First seat bot spec
    #[arg(default_value = "random")]
    player: String,

    /// Computer seat bot spec
    #[arg(default_value = "opponent")]
    opponent: String,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // Disallow human in batch sims; it would block waiting for input.
    if [&args.player, &args.opponent]
        .iter()
        .any(|s| s.to_ascii_lowercase().starts_with("human"))
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let labels = [label_for_spec(&args.player), label_for_spec(&args.opponent)];
    let mut wins: HashMap<usize, usize> = HashMap::new();
    let mut aborted_games = 0usize;
    let mut total_actions = 0usize;
    let started = Instant::now();

    for game_idx in 0..args.games {
        let deck_seed = mix_seed(args.seed, game_idx as u64, 0x5EED_15);
        // Alternate who opens so neither seat keeps the first-move advantage.
        let game = Game::builder()
            .with_seed(deck_seed)
            .with_hand_size(args.hand_size)
            .with_starting_player(game_idx % 2)
            .build()?;
        let mut seat: Box<dyn Bot> = create_bot_from_spec(
            &args.player,
            HUMAN,
            mix_seed(args.seed, game_idx as u64, 1),
        )?;
        let opponent = create_bot_from_spec(
            &args.opponent,
            COMPUTER,
            mix_seed(args.seed, game_idx as u64, 2),
        )?;
        let mut session = Session::new(game, opponent);
        session.start_new_game()?;

        let mut turns = 0usize;
        while !session.game().is_finished()
            && !session.game().is_computer_turn()
            && turns < args.max_turns
        {
            let legal = session.game().legal_actions(HUMAN)?;
            if legal.is_empty() {
                break;
            }
            let state = session.game().state_view(HUMAN)?;
            let action = seat.select_action(&state, &legal);
            session.apply_action(HUMAN, action)?;
            turns += 1;
        }
        total_actions += turns;

        match session.game().winner() {
            Some(winner) => *wins.entry(winner).or_default() += 1,
            None => aborted_games += 1,
        }
    }

    let completed = args.games - aborted_games;
    println!(
        "Ran {} games in {:.2?} ({} first-seat actions).",
        args.games,
        started.elapsed(),
        total_actions
    );
    println!("{:<12} {:>8} {:>8}", "seat", "wins", "rate");
    for (seat, label) in labels.iter().enumerate() {
        let count = wins.get(&seat).copied().unwrap_or(0);
        let rate = if completed > 0 {
            count as f64 / completed as f64
        } else {
            0.0
        };
        println!("{:<12} {:>8} {:>7.1}%", label, count, rate * 100.0);
    }
    if aborted_games > 0 {
        println!("Aborted games: {aborted_games}");
    }
    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    // Simple reversible mixer (xorshift-like mix).
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
