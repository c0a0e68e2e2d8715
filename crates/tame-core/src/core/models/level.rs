use std::fmt;
use std::str::FromStr;

/// Maximum number of characters allowed in a level label.
///
/// The limit comes from the fixed-width level columns of the LOPT input format.
pub const MAX_LABEL_LEN: usize = 10;

/// Parity of an atomic energy level.
///
/// Allowed electric-dipole transitions always connect levels of opposite parity,
/// so the matching engine pairs every even level with odd levels only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parity {
    /// Even parity, encoded as `1` in level tables.
    Even,
    /// Odd parity, encoded as `0` in level tables.
    Odd,
}

impl Parity {
    /// Decodes the numeric parity code used by level tables.
    ///
    /// Level tables store parity as `1` (even) or `0` (odd), frequently written
    /// as floats (`1.0`). Any other value is rejected.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Parity::Even)
        } else if code == 0.0 {
            Some(Parity::Odd)
        } else {
            None
        }
    }

    /// Returns the numeric code written to level tables.
    pub fn code(self) -> u8 {
        match self {
            Parity::Even => 1,
            Parity::Odd => 0,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}

impl FromStr for Parity {
    type Err = ();

    /// Parses a parity from its name (`even`/`odd`, case-insensitive) or its
    /// numeric table code (`1`/`0`, integer or float text).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "even" | "e" => Ok(Parity::Even),
            "odd" | "o" => Ok(Parity::Odd),
            _ => trimmed
                .parse::<f64>()
                .ok()
                .and_then(Parity::from_code)
                .ok_or(()),
        }
    }
}

/// A candidate atomic energy level.
///
/// Levels are supplied by the caller for one element at a time. A level whose
/// label is empty is a placeholder row (for example a freshly inserted table
/// row that was never filled in) and is rejected by the matching engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Short designation of the level, at most [`MAX_LABEL_LEN`] characters.
    pub label: String,
    /// Total angular momentum quantum number J (integer or half-integer).
    pub j: f64,
    /// Level energy in cm⁻¹.
    pub energy: f64,
    pub parity: Parity,
}

impl Level {
    pub fn new(label: &str, j: f64, energy: f64, parity: Parity) -> Self {
        Self {
            label: label.to_string(),
            j,
            energy,
            parity,
        }
    }

    /// Returns `true` for a placeholder level with an empty label.
    pub fn is_placeholder(&self) -> bool {
        self.label.is_empty()
    }

    /// Number of characters in the label, as counted against [`MAX_LABEL_LEN`].
    pub fn label_len(&self) -> usize {
        self.label.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_codes_follow_table_convention() {
        assert_eq!(Parity::from_code(1.0), Some(Parity::Even));
        assert_eq!(Parity::from_code(0.0), Some(Parity::Odd));
        assert_eq!(Parity::from_code(2.0), None);
        assert_eq!(Parity::Even.code(), 1);
        assert_eq!(Parity::Odd.code(), 0);
    }

    #[test]
    fn parity_from_str_accepts_names_and_codes() {
        assert_eq!("even".parse::<Parity>(), Ok(Parity::Even));
        assert_eq!("ODD".parse::<Parity>(), Ok(Parity::Odd));
        assert_eq!("1".parse::<Parity>(), Ok(Parity::Even));
        assert_eq!(" 0.0 ".parse::<Parity>(), Ok(Parity::Odd));
        assert_eq!("0.5".parse::<Parity>(), Err(()));
        assert_eq!("sideways".parse::<Parity>(), Err(()));
    }

    #[test]
    fn placeholder_is_detected_by_empty_label() {
        let blank = Level::new("", 0.0, 0.0, Parity::Odd);
        let named = Level::new("a5D4", 4.0, 0.0, Parity::Even);
        assert!(blank.is_placeholder());
        assert!(!named.is_placeholder());
    }

    #[test]
    fn label_length_counts_characters_not_bytes() {
        let level = Level::new("3d⁶4s", 1.0, 10.0, Parity::Even);
        assert_eq!(level.label_len(), 5);
    }
}
