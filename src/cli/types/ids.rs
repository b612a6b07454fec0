//! ID types for the fantasy league.

use crate::error::{FantasyError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for a squad (shirt) number.
///
/// Squad numbers are the stable key for a player inside a gameweek's
/// statistics table and inside a lineup. Upstream data is loose about
/// how it writes them, so parsing accepts surrounding whitespace and an
/// optional leading `#`, and deserialization accepts either a JSON number
/// or a numeric string.
///
/// # Examples
///
/// ```rust
/// use hoops_fantasy::PlayerNumber;
///
/// let number: PlayerNumber = " #23 ".parse().unwrap();
/// assert_eq!(number, PlayerNumber::new(23));
/// assert_eq!(number.to_string(), "23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PlayerNumber(pub u32);

impl PlayerNumber {
    /// Create a new PlayerNumber from a u32 value.
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Get the underlying u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PlayerNumber {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
        Ok(Self(digits.parse()?))
    }
}

impl<'de> Deserialize<'de> for PlayerNumber {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u32),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Self(n)),
            Raw::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                Ok(Self(f as u32))
            }
            Raw::Float(f) => Err(de::Error::custom(format!("invalid squad number {f}"))),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// Type-safe wrapper for gameweek numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gameweek(pub u16);

impl Gameweek {
    pub fn new(gameweek: u16) -> Self {
        Self(gameweek)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Gameweek {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Gameweek {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Coach selection code.
///
/// Codes are case-insensitive; they are stored trimmed and upper-cased so
/// `"mk"`, `" MK "` and `"MK"` select the same coach.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CoachCode(String);

impl CoachCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoachCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CoachCode {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(FantasyError::InvalidLineup {
                reason: "coach code is empty".to_string(),
            });
        }
        Ok(Self::new(s))
    }
}

impl<'de> Deserialize<'de> for CoachCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
