//! Generates a seeded board and clears it by always playing the first hint,
//! reshuffling on deadlock.
//!
//! Run: cargo run --bin autoplay -- [seed]

use rand::SeedableRng;
use rand::rngs::StdRng;
use tilelink_board::{
    BoardConfig, Selector, TurnEvent, TurnMsg, find_pair, generate, shuffle_until_playable,
};

const MAX_RESHUFFLES: usize = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seed = match std::env::args().nth(1) {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let config = BoardConfig::default();
    let mut board = generate(&config, &mut rng)?;
    let mut selector = Selector::new();

    println!("seed {seed}\n{board}\n");

    let mut moves = 0;
    let mut reshuffles = 0;
    while !board.is_cleared() {
        let Some((a, b)) = find_pair(&board) else {
            if !shuffle_until_playable(&mut board, &mut rng, MAX_RESHUFFLES) {
                break;
            }
            reshuffles += 1;
            println!("deadlock, reshuffled:\n{board}\n");
            continue;
        };
        selector.update(&mut board, TurnMsg::Select(a));
        match selector.update(&mut board, TurnMsg::Select(b)) {
            TurnEvent::Matched { a, b, turns } => {
                moves += 1;
                println!("{moves:3}: {a} - {b} ({turns}), {} left", board.remaining());
            }
            other => return Err(format!("hint {a} - {b} was not playable: {other:?}").into()),
        }
    }

    if board.is_cleared() {
        println!("\ncleared in {moves} moves with {reshuffles} reshuffles");
    } else {
        println!("\nstuck after {MAX_RESHUFFLES} shuffles:\n{board}");
    }
    Ok(())
}
