//! Motion style preset definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available motion styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Film-like motion with dramatic pacing
    #[default]
    Cinematic,
    /// Fluid, interpolated motion
    Smooth,
    /// Neon-tinged, glitch-heavy motion
    Cyberpunk,
    /// Exaggerated animation-style motion
    Anime,
}

impl Style {
    /// All available styles.
    pub const ALL: &'static [Style] = &[
        Style::Cinematic,
        Style::Smooth,
        Style::Cyberpunk,
        Style::Anime,
    ];

    /// Returns the style name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Cinematic => "cinematic",
            Style::Smooth => "smooth",
            Style::Cyberpunk => "cyberpunk",
            Style::Anime => "anime",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cinematic" => Ok(Style::Cinematic),
            "smooth" => Ok(Style::Smooth),
            "cyberpunk" => Ok(Style::Cyberpunk),
            "anime" => Ok(Style::Anime),
            _ => Err(StyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown style: {0}")]
pub struct StyleParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_parse() {
        assert_eq!("cinematic".parse::<Style>().unwrap(), Style::Cinematic);
        assert_eq!("CYBERPUNK".parse::<Style>().unwrap(), Style::Cyberpunk);
        assert!("unknown".parse::<Style>().is_err());
    }

    #[test]
    fn test_style_display() {
        assert_eq!(Style::Anime.to_string(), "anime");
        assert_eq!(Style::Smooth.to_string(), "smooth");
    }

    #[test]
    fn test_style_default() {
        assert_eq!(Style::default(), Style::Cinematic);
    }

    #[test]
    fn test_style_wire_format() {
        assert_eq!(
            serde_json::to_string(&Style::Cyberpunk).unwrap(),
            "\"cyberpunk\""
        );
    }
}
