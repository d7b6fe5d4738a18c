use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PlaygroundError;

/// Style tag picked next to the prompt. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum Vibe {
    #[default]
    Vibrant,
    Photoreal,
    Illustrative,
    Minimal,
    Surreal,
}

impl Vibe {
    pub const ALL: [Vibe; 5] = [Vibe::Vibrant, Vibe::Photoreal, Vibe::Illustrative, Vibe::Minimal, Vibe::Surreal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vibe::Vibrant => "Vibrant",
            Vibe::Photoreal => "Photoreal",
            Vibe::Illustrative => "Illustrative",
            Vibe::Minimal => "Minimal",
            Vibe::Surreal => "Surreal",
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vibe {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Vibe::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlaygroundError::UnknownVibe(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("surreal".parse::<Vibe>().unwrap(), Vibe::Surreal);
        assert_eq!(" PHOTOREAL ".parse::<Vibe>().unwrap(), Vibe::Photoreal);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "Grunge".parse::<Vibe>().unwrap_err();
        assert!(matches!(err, PlaygroundError::UnknownVibe(ref n) if n == "Grunge"));
    }

    #[test]
    fn default_is_first() {
        assert_eq!(Vibe::default(), Vibe::ALL[0]);
    }
}
