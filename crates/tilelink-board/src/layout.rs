//! Random board layouts and shuffling.
//!
//! All functions take the random number generator from the caller so that
//! seeded generators give reproducible boards.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tilelink_core::{Point, Range};

use crate::board::{Board, TileKind};
use crate::hint::has_moves;

/// Shape of a generated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    /// Full board width, margin included.
    pub width: i32,
    /// Full board height, margin included.
    pub height: i32,
    /// Number of distinct tile kinds.
    pub kinds: u16,
    /// Width of the always-empty ring around the tiles. Paths may run
    /// through it, which lets tiles on the outer rows connect around the
    /// edge.
    pub margin: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 12,
            height: 10,
            kinds: 8,
            margin: 1,
        }
    }
}

impl BoardConfig {
    /// The cells that receive tiles.
    pub fn interior(&self) -> Range {
        Range::sized(self.width, self.height).shift(
            self.margin,
            self.margin,
            -self.margin,
            -self.margin,
        )
    }

    /// Check that the configuration describes a board that can be filled
    /// with pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kinds == 0 {
            return Err(ConfigError::NoKinds);
        }
        if self.margin < 0 {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        let interior = self.interior();
        if interior.is_empty() {
            return Err(ConfigError::TooSmall {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        if interior.len() % 2 != 0 {
            return Err(ConfigError::OddTileCount(interior.len()));
        }
        Ok(())
    }
}

/// Errors reported by [`BoardConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No room for tiles once the margin is removed.
    TooSmall { width: i32, height: i32, margin: i32 },
    /// The interior holds an odd number of cells, so it cannot be paired.
    OddTileCount(usize),
    /// At least one tile kind is required.
    NoKinds,
    /// The margin cannot be negative.
    NegativeMargin(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall {
                width,
                height,
                margin,
            } => write!(
                f,
                "board config: {width}x{height} leaves no tiles inside a margin of {margin}"
            ),
            Self::OddTileCount(n) => write!(f, "board config: {n} tiles cannot be paired"),
            Self::NoKinds => write!(f, "board config: at least one tile kind is required"),
            Self::NegativeMargin(m) => write!(f, "board config: negative margin {m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Generate a full board of randomly placed pairs.
///
/// Pair `i` gets kind `i % kinds`, so every kind appears an even number of
/// times and the counts differ by at most one pair.
pub fn generate(config: &BoardConfig, rng: &mut impl Rng) -> Result<Board, ConfigError> {
    config.validate()?;
    let interior = config.interior();
    let mut kinds: Vec<TileKind> = (0..interior.len() / 2)
        .flat_map(|i| {
            let k = TileKind((i % config.kinds as usize) as u16);
            [k, k]
        })
        .collect();
    kinds.shuffle(rng);

    let mut board = Board::new(config.width, config.height);
    for (p, k) in interior.iter().zip(kinds) {
        board.set(p, Some(k));
    }
    log::debug!(
        "generated {}x{} board with {} tiles of {} kinds",
        config.width,
        config.height,
        interior.len(),
        config.kinds
    );
    Ok(board)
}

/// Permute the remaining tiles over the cells they currently occupy.
pub fn shuffle(board: &mut Board, rng: &mut impl Rng) {
    let (cells, mut kinds): (Vec<Point>, Vec<TileKind>) = board.tiles().unzip();
    kinds.shuffle(rng);
    for (p, k) in cells.into_iter().zip(kinds) {
        board.set(p, Some(k));
    }
}

/// Shuffle until the board has a playable pair, at most `max_attempts` times.
///
/// Returns `true` if the board ends up playable or is already cleared. A
/// board that is playable on entry is left untouched.
pub fn shuffle_until_playable(board: &mut Board, rng: &mut impl Rng, max_attempts: usize) -> bool {
    if board.is_cleared() || has_moves(board) {
        return true;
    }
    for attempt in 1..=max_attempts {
        shuffle(board, rng);
        log::debug!("reshuffled {} tiles (attempt {attempt})", board.remaining());
        if has_moves(board) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn counts(board: &Board) -> HashMap<TileKind, usize> {
        let mut m = HashMap::new();
        for (_, k) in board.tiles() {
            *m.entry(k).or_insert(0) += 1;
        }
        m
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.interior(), Range::new(1, 1, 11, 9));
    }

    #[test]
    fn validate_rejects_bad_configs() {
        let odd = BoardConfig {
            width: 5,
            height: 5,
            kinds: 4,
            margin: 1,
        };
        assert_eq!(odd.validate(), Err(ConfigError::OddTileCount(9)));
        let tiny = BoardConfig {
            width: 2,
            height: 2,
            kinds: 4,
            margin: 1,
        };
        assert!(matches!(tiny.validate(), Err(ConfigError::TooSmall { .. })));
        let none = BoardConfig {
            kinds: 0,
            ..BoardConfig::default()
        };
        assert_eq!(none.validate(), Err(ConfigError::NoKinds));
        let neg = BoardConfig {
            margin: -1,
            ..BoardConfig::default()
        };
        assert_eq!(neg.validate(), Err(ConfigError::NegativeMargin(-1)));
    }

    #[test]
    fn generate_fills_interior_with_pairs() {
        let cfg = BoardConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let board = generate(&cfg, &mut rng).unwrap();
        assert_eq!(board.remaining(), 80);
        for (p, _) in board.tiles() {
            assert!(cfg.interior().contains(p));
        }
        let c = counts(&board);
        assert_eq!(c.len(), 8);
        assert!(c.values().all(|&n| n == 10));
    }

    #[test]
    fn generate_is_reproducible_with_a_seed() {
        let cfg = BoardConfig::default();
        let a = generate(&cfg, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = generate(&cfg, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generate_without_margin_uses_every_cell() {
        let cfg = BoardConfig {
            width: 4,
            height: 3,
            kinds: 5,
            margin: 0,
        };
        let board = generate(&cfg, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(board.remaining(), 12);
        // 6 pairs over 5 kinds: kind 0 gets two pairs.
        assert_eq!(counts(&board)[&TileKind(0)], 4);
    }

    #[test]
    fn shuffle_keeps_cells_and_counts() {
        let mut board = Board::parse("A.B\n.BA\nCC.").unwrap();
        let before_cells: Vec<_> = board.tiles().map(|(p, _)| p).collect();
        let before_counts = counts(&board);
        shuffle(&mut board, &mut StdRng::seed_from_u64(5));
        let after_cells: Vec<_> = board.tiles().map(|(p, _)| p).collect();
        assert_eq!(before_cells, after_cells);
        assert_eq!(before_counts, counts(&board));
    }

    #[test]
    fn playable_board_is_left_alone() {
        let mut board = Board::parse("AA\nBB").unwrap();
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle_until_playable(&mut board, &mut rng, 10));
        assert_eq!(board, before);
    }

    #[test]
    fn cleared_board_counts_as_playable() {
        let mut board = Board::new(3, 3);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle_until_playable(&mut board, &mut rng, 0));
    }

    #[test]
    fn deadlock_without_attempts_gives_up() {
        let mut board = Board::parse("AB\nBA").unwrap();
        let before = board.clone();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(!shuffle_until_playable(&mut board, &mut rng, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn deadlock_is_broken_by_reshuffling() {
        // Alternating kinds on a single row: no pair can connect.
        let mut board = Board::parse("ABAB").unwrap();
        assert!(!has_moves(&board));
        let mut rng = StdRng::seed_from_u64(9);
        assert!(shuffle_until_playable(&mut board, &mut rng, 50));
        assert!(has_moves(&board));
        assert_eq!(board.remaining(), 4);
    }
}
