//! **tilelink-core** — primitives shared by the tilelink crates.
//!
//! This crate provides board geometry ([`Point`], [`Direction`], [`Range`])
//! and the read-only [`Occupancy`] snapshot that connectivity queries run
//! against.

pub mod geom;
pub mod occupancy;

pub use geom::{Direction, Point, Range};
pub use occupancy::{Occupancy, OccupancyError};
