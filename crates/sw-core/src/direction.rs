//! Migration direction

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a migration file is applied forward or reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply forward
    Up,
    /// Revert
    Down,
}

impl Direction {
    /// The filename segment that marks this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(CoreError::UnhandledDirection {
                direction: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directions() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("down".parse::<Direction>().unwrap(), Direction::Down);
    }

    #[test]
    fn test_unhandled_direction() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(matches!(err, CoreError::UnhandledDirection { ref direction } if direction == "sideways"));
        assert!(err.to_string().contains("[E005]"));
    }

    #[test]
    fn test_direction_is_case_sensitive() {
        assert!("UP".parse::<Direction>().is_err());
    }
}
