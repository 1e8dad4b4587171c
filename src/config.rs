//! Game configuration: grid size and strain count.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_SIDE: usize = 2;
pub const MIN_STRAINS: u8 = 2;
pub const MAX_STRAINS: u8 = 8;
/// Largest board accepted, in cells (1024x1024).
pub const MAX_CELLS: usize = 1 << 20;

pub const DEFAULT_SIDE: usize = 14;
pub const DEFAULT_STRAINS: u8 = 6;

/// Shape of a puzzle. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub strains: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::square(DEFAULT_SIDE, DEFAULT_STRAINS)
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize, strains: u8) -> Self {
        Self { width, height, strains }
    }

    /// A `size x size` grid.
    pub fn square(size: usize, strains: u8) -> Self {
        Self::new(size, size, strains)
    }

    /// Saturates for shapes that `validate` would reject.
    pub fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self
            .width
            .checked_mul(self.height)
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(MIN_STRAINS..=MAX_STRAINS).contains(&self.strains) {
            return Err(ConfigError::StrainCount { strains: self.strains });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_setup() {
        let cfg = GameConfig::default();
        assert_eq!((cfg.width, cfg.height, cfg.strains), (14, 14, 6));
        assert_eq!(cfg.cell_count(), 196);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_grid() {
        assert_eq!(
            GameConfig::new(1, 5, 4).validate(),
            Err(ConfigError::GridTooSmall { width: 1, height: 5 })
        );
        assert!(GameConfig::new(2, 2, 2).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let overflow = GameConfig::new(usize::MAX / 2, 3, 4);
        assert_eq!(
            overflow.validate(),
            Err(ConfigError::GridTooLarge { width: usize::MAX / 2, height: 3 })
        );
        assert!(GameConfig::square(70_000, 4).validate().is_err());
        assert!(GameConfig::new(1024, 1025, 4).validate().is_err());
        assert!(GameConfig::square(1024, 4).validate().is_ok());
    }

    #[test]
    fn test_validate_strain_range() {
        assert_eq!(
            GameConfig::square(10, 1).validate(),
            Err(ConfigError::StrainCount { strains: 1 })
        );
        assert_eq!(
            GameConfig::square(10, 9).validate(),
            Err(ConfigError::StrainCount { strains: 9 })
        );
        assert!(GameConfig::square(10, 8).validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{ "strains": 4 }"#).unwrap();
        assert_eq!(cfg, GameConfig::square(14, 4));
    }
}
