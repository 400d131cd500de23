//! Connectivity checks for tile-matching boards.
//!
//! Two tiles may be matched when an orthogonal path with at most two turns
//! joins them through empty cells. [`can_connect`] answers that question
//! for any board implementing [`Blocker`], such as a
//! [`tilelink_core::Occupancy`] snapshot.
//!
//! | Function | Turns |
//! |---|---|
//! | [`straight_line`] | 0 |
//! | [`one_turn`] | 1 |
//! | [`two_turn`] | 2 |
//!
//! The checks are pure: they read the snapshot, allocate a short list of
//! pivot cells for the two-turn case, and never fail.

mod connect;
mod traits;

pub use connect::{
    Turns, can_connect, can_connect_dims, connection, one_turn, straight_line, two_turn,
    visible_from,
};
pub use traits::{Blocker, FlagGrid};
