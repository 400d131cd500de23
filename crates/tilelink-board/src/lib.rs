//! The collaborators around the connectivity checks: the tile board, turn
//! resolution, hints, and random layouts.
//!
//! A typical game loop generates a [`Board`] with [`generate`], feeds player
//! input through a [`Selector`], and calls [`shuffle_until_playable`] when
//! [`has_moves`] reports a deadlock.

pub mod board;
pub mod hint;
pub mod layout;
pub mod turn;

pub use board::{Board, MatchError, ParseError, TileKind};
pub use hint::{find_pair, has_moves};
pub use layout::{BoardConfig, ConfigError, generate, shuffle, shuffle_until_playable};
pub use turn::{Selector, TurnEvent, TurnMsg};
pub use tilelink_paths::Turns;
