use super::level::Level;
use std::fmt;

/// A proposed identification of an observed line as a transition between two levels.
///
/// `upper_level` always names the level with the higher energy of the pair, which is
/// the order the LOPT input format expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Name of the element (or ion stage) whose levels produced the transition.
    pub element: String,
    pub upper_level: String,
    pub lower_level: String,
    /// Set when the candidate transition behind this assignment fell within
    /// tolerance of more than one observed line.
    pub ambiguous: bool,
}

impl Assignment {
    pub fn new(element: &str, upper_level: &str, lower_level: &str) -> Self {
        Self {
            element: element.to_string(),
            upper_level: upper_level.to_string(),
            lower_level: lower_level.to_string(),
            ambiguous: false,
        }
    }

    /// Builds the assignment for a transition between `a` and `b`.
    ///
    /// The level with the strictly higher energy becomes the upper level; on a tie
    /// `b` is taken as the upper level.
    pub fn between(element: &str, a: &Level, b: &Level, ambiguous: bool) -> Self {
        let (upper, lower) = if a.energy > b.energy { (a, b) } else { (b, a) };
        Self {
            element: element.to_string(),
            upper_level: upper.label.clone(),
            lower_level: lower.label.clone(),
            ambiguous,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} - {}",
            self.element, self.upper_level, self.lower_level
        )
    }
}

/// Joins the display form of each assignment with `separator`.
pub fn join_designations(assignments: &[Assignment], separator: &str) -> String {
    assignments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::level::Parity;

    #[test]
    fn between_orders_levels_by_energy() {
        let low = Level::new("a", 0.0, 0.0, Parity::Even);
        let high = Level::new("b", 1.0, 100.0, Parity::Odd);

        let forward = Assignment::between("Fe II", &low, &high, false);
        let reverse = Assignment::between("Fe II", &high, &low, true);

        assert_eq!(forward.upper_level, "b");
        assert_eq!(forward.lower_level, "a");
        assert_eq!(reverse.upper_level, "b");
        assert_eq!(reverse.lower_level, "a");
        assert!(reverse.ambiguous);
    }

    #[test]
    fn between_takes_second_level_as_upper_on_equal_energy() {
        let even = Level::new("e", 1.0, 50.0, Parity::Even);
        let odd = Level::new("o", 1.0, 50.0, Parity::Odd);
        let assignment = Assignment::between("X", &even, &odd, false);
        assert_eq!(assignment.upper_level, "o");
        assert_eq!(assignment.lower_level, "e");
    }

    #[test]
    fn display_matches_designation_format() {
        let assignment = Assignment::new("Nd III", "6I7.5", "4I4.5");
        assert_eq!(assignment.to_string(), "Nd III: 6I7.5 - 4I4.5");
    }

    #[test]
    fn join_designations_uses_separator_and_handles_empty() {
        let list = vec![Assignment::new("A", "u1", "l1"), Assignment::new("B", "u2", "l2")];
        assert_eq!(join_designations(&list, "\t"), "A: u1 - l1\tB: u2 - l2");
        assert_eq!(join_designations(&[], "\t"), "");
    }
}
