//! Immutable engine configuration.
//!
//! A [`GameConfig`] is handed to the engine at construction and never changes
//! afterwards. Defaults come from the constants in `blockdrop_types`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    BASE_DROP_MS, BOARD_HEIGHT, BOARD_WIDTH, FLASH_MS, HARD_DROP_POINTS, LEVEL_DROP_STEP_MS,
    LINES_PER_LEVEL, LINE_POINTS, MAX_CLEAR_ROWS, MIN_DROP_MS, SOFT_DROP_POINTS,
};

/// Smallest accepted board edge; the straight piece needs 4 cells either way.
pub const MIN_BOARD_EDGE: u8 = 4;

/// Largest accepted board edge (coordinates are `i8`).
pub const MAX_BOARD_EDGE: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Gravity interval at level 1.
    pub base_drop_interval_ms: u32,
    /// Interval reduction per level above 1.
    pub level_drop_step_ms: u32,
    /// Interval floor.
    pub min_drop_interval_ms: u32,
    pub lines_per_level: u32,
    /// Points for clearing 0..=4 rows at level 1.
    pub line_points: [u32; MAX_CLEAR_ROWS + 1],
    pub soft_drop_points: u32,
    pub hard_drop_points: u32,
    /// Duration of the cosmetic flash after a line clear.
    pub flash_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_drop_interval_ms: BASE_DROP_MS,
            level_drop_step_ms: LEVEL_DROP_STEP_MS,
            min_drop_interval_ms: MIN_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
            line_points: LINE_POINTS,
            soft_drop_points: SOFT_DROP_POINTS,
            hard_drop_points: HARD_DROP_POINTS,
            flash_ms: FLASH_MS,
        }
    }
}

impl GameConfig {
    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_BOARD_EDGE || self.height < MIN_BOARD_EDGE {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_BOARD_EDGE,
            });
        }
        if self.width > MAX_BOARD_EDGE || self.height > MAX_BOARD_EDGE {
            return Err(ConfigError::BoardTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_BOARD_EDGE,
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.base_drop_interval_ms == 0 {
            return Err(ConfigError::ZeroBaseInterval);
        }
        if self.min_drop_interval_ms == 0 || self.min_drop_interval_ms > self.base_drop_interval_ms
        {
            return Err(ConfigError::MinIntervalOutOfRange {
                min_ms: self.min_drop_interval_ms,
                base_ms: self.base_drop_interval_ms,
            });
        }
        for (index, pair) in self.line_points.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(ConfigError::LinePointsNotMonotonic {
                    index: index + 1,
                    value: pair[1],
                    previous: pair[0],
                });
            }
        }
        Ok(())
    }

    /// Spawn column for most kinds: `floor(width / 2) - 1`.
    pub fn spawn_x(&self) -> i8 {
        (self.width / 2) as i8 - 1
    }

    /// Spawn row, two below the top.
    pub fn spawn_y(&self) -> i8 {
        self.height as i8 - 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spawn_x(), 4);
        assert_eq!(config.spawn_y(), 18);
    }

    #[test]
    fn rejects_tiny_board() {
        let config = GameConfig {
            width: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                width: 3,
                height: 20,
                min: MIN_BOARD_EDGE
            })
        );
    }

    #[test]
    fn rejects_oversized_board() {
        let config = GameConfig {
            height: 100,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_bad_intervals() {
        let zero_base = GameConfig {
            base_drop_interval_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero_base.validate(), Err(ConfigError::ZeroBaseInterval));

        let floor_above_base = GameConfig {
            min_drop_interval_ms: 2000,
            ..GameConfig::default()
        };
        assert!(matches!(
            floor_above_base.validate(),
            Err(ConfigError::MinIntervalOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_decreasing_points() {
        let config = GameConfig {
            line_points: [0, 100, 50, 500, 800],
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::LinePointsNotMonotonic {
                index: 2,
                value: 50,
                previous: 100
            })
        );
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("must not decrease"));
    }

    #[test]
    fn rejects_zero_lines_per_level() {
        let config = GameConfig {
            lines_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLinesPerLevel));
    }
}
