//! Pasquill-Gifford atmospheric stability classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PlumeError;

/// Pasquill-Gifford stability class.
///
/// Ordered from most unstable (`A`, strong convective mixing) to most stable
/// (`F`, calm night-time conditions). The derived `Ord` follows that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StabilityClass {
    /// Very unstable
    A,
    /// Unstable
    B,
    /// Slightly unstable
    C,
    /// Neutral
    D,
    /// Slightly stable
    E,
    /// Stable
    F,
}

impl StabilityClass {
    /// All classes in canonical A→F order.
    pub const ALL: [StabilityClass; 6] = [
        StabilityClass::A,
        StabilityClass::B,
        StabilityClass::C,
        StabilityClass::D,
        StabilityClass::E,
        StabilityClass::F,
    ];

    /// Descriptive condition label for display.
    pub fn label(self) -> &'static str {
        match self {
            StabilityClass::A => "Very Unstable",
            StabilityClass::B => "Unstable",
            StabilityClass::C => "Slightly Unstable",
            StabilityClass::D => "Neutral",
            StabilityClass::E => "Slightly Stable",
            StabilityClass::F => "Stable",
        }
    }

    /// The class letter.
    pub fn letter(self) -> char {
        match self {
            StabilityClass::A => 'A',
            StabilityClass::B => 'B',
            StabilityClass::C => 'C',
            StabilityClass::D => 'D',
            StabilityClass::E => 'E',
            StabilityClass::F => 'F',
        }
    }

    /// Position in [`StabilityClass::ALL`] (0 for A through 5 for F).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<char> for StabilityClass {
    type Error = PlumeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(StabilityClass::A),
            'B' => Ok(StabilityClass::B),
            'C' => Ok(StabilityClass::C),
            'D' => Ok(StabilityClass::D),
            'E' => Ok(StabilityClass::E),
            'F' => Ok(StabilityClass::F),
            _ => Err(PlumeError::InvalidClass(c.to_string())),
        }
    }
}

impl FromStr for StabilityClass {
    type Err = PlumeError;

    /// Parse a single class letter, case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => StabilityClass::try_from(c),
            _ => Err(PlumeError::InvalidClass(s.to_string())),
        }
    }
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_runs_unstable_to_stable() {
        let mut sorted = StabilityClass::ALL;
        sorted.sort();
        assert_eq!(sorted, StabilityClass::ALL);
        assert!(StabilityClass::A < StabilityClass::F);
        assert!(StabilityClass::D < StabilityClass::E);
    }

    #[test]
    fn parse_accepts_canonical_letters() {
        for class in StabilityClass::ALL {
            let upper = class.letter().to_string();
            let lower = upper.to_lowercase();
            assert_eq!(upper.parse::<StabilityClass>().unwrap(), class);
            assert_eq!(lower.parse::<StabilityClass>().unwrap(), class);
        }
        assert_eq!(" d ".parse::<StabilityClass>().unwrap(), StabilityClass::D);
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        for token in ["G", "", "AB", "1", "Neutral"] {
            let err = token.parse::<StabilityClass>().unwrap_err();
            assert!(
                matches!(err, PlumeError::InvalidClass(ref t) if t == token),
                "token {token:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn labels_match_letters() {
        assert_eq!(StabilityClass::A.label(), "Very Unstable");
        assert_eq!(StabilityClass::D.label(), "Neutral");
        assert_eq!(StabilityClass::F.label(), "Stable");
        assert_eq!(StabilityClass::C.to_string(), "C");
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, class) in StabilityClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn serde_uses_letter() {
        let json = serde_json::to_string(&StabilityClass::E).unwrap();
        assert_eq!(json, "\"E\"");
        let back: StabilityClass = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(back, StabilityClass::B);
    }
}
