use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use whot::{
    BincodeLedger, Bot, Game, HUMAN, Session, VisualOptions, create_bot_from_spec, describe_action,
    describe_event, render_snapshot,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play one game of Whot against the computer.")]
struct Args {
    /// Seed for shuffling and bot randomness
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Cards dealt to each player
    #[arg(long = "hand-size", default_value_t = whot::card::HAND_SIZE)]
    hand_size: usize,

    /// Stop after this many actions by the first seat
    #[arg(long = "max-turns")]
    max_turns: Option<usize>,

    /// Print the table and every engine event
    #[arg(long = "visualize")]
    visualize: bool,

    /// Mirror the first seat's moves to this file as bincode frames
    #[arg(long = "ledger")]
    ledger: Option<PathBuf>,

    /// Let the computer go first
    #[arg(long = "computer-first")]
    computer_first: bool,

    /// First seat: human[:name], random[:seed] or opponent[:seed]
    #[arg(long = "player", default_value = "human")]
    player: String,

    /// Computer seat: random[:seed] or opponent[:seed]
    #[arg(long = "opponent", default_value = "opponent")]
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
    if args.opponent.to_ascii_lowercase().starts_with("human") {
        return Err("the computer seat cannot be played by a human".into());
    }
    let game = Game::builder()
        .with_seed(args.seed)
        .with_hand_size(args.hand_size)
        .with_starting_player(usize::from(args.computer_first))
        .build()?;
    let mut seat: Box<dyn Bot> = create_bot_from_spec(&args.player, HUMAN, args.seed)?;
    let opponent = create_bot_from_spec(&args.opponent, whot::COMPUTER, args.seed)?;
    let mut session = Session::new(game, opponent);
    if let Some(path) = &args.ledger {
        let writer = BufWriter::new(File::create(path)?);
        session = session.with_ledger(Box::new(BincodeLedger::new(writer)));
    }

    println!("Starting Whot game (seed {:#x}).\n", args.seed);
    session.start_new_game()?;
    print_events(&mut session, args.visualize);

    let mut turns = 0usize;
    loop {
        if session.game().is_finished() {
            break;
        }
        if session.game().is_computer_turn() {
            println!("The computer is stuck with an empty market. Stopping game.");
            break;
        }
        if let Some(limit) = args.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping game.");
                break;
            }
        }
        let legal = session.game().legal_actions(HUMAN)?;
        if legal.is_empty() {
            println!("No playable card and the market is empty. Stopping game.");
            break;
        }
        let state = session.game().state_view(HUMAN)?;
        if args.visualize {
            println!(
                "{}",
                render_snapshot(&session.snapshot(), VisualOptions::default())
            );
        }
        let action = seat.select_action(&state, &legal);
        if args.visualize {
            println!("Chosen action: {}", describe_action(&action));
        }
        session.apply_action(HUMAN, action)?;
        print_events(&mut session, args.visualize);
        turns += 1;
    }

    match session.game().winner() {
        Some(winner) => {
            let name = &session.game().config().player_names[winner];
            println!("Game finished. Winner: {name} (player {winner}).");
        }
        None => println!("Game stopped before completion."),
    }
    Ok(())
}

fn print_events(session: &mut Session, visualize: bool) {
    for event in session.drain_events() {
        let important = matches!(
            event,
            whot::GameEvent::LastCard { .. }
                | whot::GameEvent::GameWon { .. }
                | whot::GameEvent::LedgerSyncFailed { .. }
        );
        if visualize || important {
            println!("  {}", describe_event(&event));
        }
    }
}
