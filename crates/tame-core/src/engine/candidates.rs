use super::level_set::LevelSet;
use crate::core::models::assignment::Assignment;
use crate::core::models::level::Level;

/// A hypothesized transition between an even and an odd level.
///
/// Candidates borrow their levels and exist only for the duration of one
/// matching pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateTransition<'a> {
    pub even: &'a Level,
    pub odd: &'a Level,
    /// `|E_even - E_odd|` in cm⁻¹.
    pub predicted_wavenumber: f64,
}

impl<'a> CandidateTransition<'a> {
    pub fn new(even: &'a Level, odd: &'a Level) -> Self {
        Self {
            even,
            odd,
            predicted_wavenumber: (even.energy - odd.energy).abs(),
        }
    }

    /// The assignment this transition implies for a matched line.
    pub fn assignment(&self, element: &str, ambiguous: bool) -> Assignment {
        Assignment::between(element, self.even, self.odd, ambiguous)
    }
}

/// Closed range of odd-level J values reachable from an even level under the
/// electric-dipole rule ΔJ ∈ {-1, 0, +1} with J = 0 → J = 0 forbidden.
pub fn allowed_odd_j_range(j_even: f64) -> (f64, f64) {
    if j_even == 0.0 {
        (1.0, 1.0)
    } else {
        (j_even - 1.0, j_even + 1.0)
    }
}

/// Returns the run of `odd` (sorted ascending by J) whose J values lie in the
/// allowed range for `j_even`, found with two binary searches.
pub fn odd_partners<'s, 'a>(odd: &'s [&'a Level], j_even: f64) -> &'s [&'a Level] {
    let (low, high) = allowed_odd_j_range(j_even);
    let start = odd.partition_point(|l| l.j < low);
    let end = odd.partition_point(|l| l.j <= high);
    &odd[start..end.max(start)]
}

/// Candidates between one even level and every allowed partner in `odd`.
pub fn transitions_from<'s, 'a>(
    even: &'a Level,
    odd: &'s [&'a Level],
) -> impl Iterator<Item = CandidateTransition<'a>> {
    odd_partners(odd, even.j)
        .iter()
        .map(move |&odd_level| CandidateTransition::new(even, odd_level))
}

/// All candidate transitions of a level set, even levels in ascending J order.
pub fn generate<'s, 'a>(
    level_set: &'s LevelSet<'a>,
) -> impl Iterator<Item = CandidateTransition<'a>> {
    level_set
        .even()
        .iter()
        .flat_map(move |&even| transitions_from(even, level_set.odd()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::level::Parity;

    fn lev(label: &str, j: f64, energy: f64, parity: Parity) -> Level {
        Level::new(label, j, energy, parity)
    }

    fn pairs(levels: &[Level]) -> Vec<(String, String, f64)> {
        let set = LevelSet::new(levels).unwrap();
        generate(&set)
            .map(|c| {
                (
                    c.even.label.clone(),
                    c.odd.label.clone(),
                    c.predicted_wavenumber,
                )
            })
            .collect()
    }

    #[test]
    fn j_zero_even_level_pairs_only_with_j_one() {
        let levels = vec![
            lev("A", 0.0, 0.0, Parity::Even),
            lev("O0", 0.0, 10.0, Parity::Odd),
            lev("O1", 1.0, 100.0, Parity::Odd),
            lev("O2", 2.0, 200.0, Parity::Odd),
        ];
        assert_eq!(
            pairs(&levels),
            vec![("A".to_string(), "O1".to_string(), 100.0)]
        );
    }

    #[test]
    fn delta_j_of_two_is_excluded() {
        let levels = vec![
            lev("A", 0.0, 0.0, Parity::Even),
            lev("B", 1.0, 100.0, Parity::Odd),
            lev("C", 2.0, 100.0, Parity::Odd),
        ];
        let result = pairs(&levels);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].1, "B");
    }

    #[test]
    fn nonzero_j_accepts_delta_j_minus_one_zero_and_plus_one() {
        let levels = vec![
            lev("E", 2.0, 500.0, Parity::Even),
            lev("O0", 0.0, 0.0, Parity::Odd),
            lev("O1", 1.0, 100.0, Parity::Odd),
            lev("O2", 2.0, 200.0, Parity::Odd),
            lev("O3", 3.0, 300.0, Parity::Odd),
            lev("O4", 4.0, 900.0, Parity::Odd),
        ];
        let odd: Vec<_> = pairs(&levels).into_iter().map(|p| p.1).collect();
        assert_eq!(odd, ["O1", "O2", "O3"]);
    }

    #[test]
    fn j_one_even_level_reaches_j_zero_odd_level() {
        let levels = vec![
            lev("E", 1.0, 0.0, Parity::Even),
            lev("O0", 0.0, 42.0, Parity::Odd),
        ];
        assert_eq!(
            pairs(&levels),
            vec![("E".to_string(), "O0".to_string(), 42.0)]
        );
    }

    #[test]
    fn half_integer_j_values_follow_the_same_rule() {
        let levels = vec![
            lev("E", 0.5, 0.0, Parity::Even),
            lev("O05", 0.5, 10.0, Parity::Odd),
            lev("O15", 1.5, 20.0, Parity::Odd),
            lev("O25", 2.5, 30.0, Parity::Odd),
        ];
        let odd: Vec<_> = pairs(&levels).into_iter().map(|p| p.1).collect();
        assert_eq!(odd, ["O05", "O15"]);
    }

    #[test]
    fn predicted_wavenumber_is_absolute_energy_difference() {
        let levels = vec![
            lev("E", 1.0, 5000.0, Parity::Even),
            lev("O", 1.0, 1200.5, Parity::Odd),
        ];
        let result = pairs(&levels);
        assert_eq!(result[0].2, 3799.5);
    }

    #[test]
    fn every_allowed_pair_is_generated_exactly_once() {
        let mut levels = Vec::new();
        for (i, j) in [0.0, 1.0, 1.0, 2.0, 3.0].iter().enumerate() {
            levels.push(lev(&format!("e{i}"), *j, 1000.0 * i as f64, Parity::Even));
        }
        for (i, j) in [0.0, 0.0, 1.0, 2.0, 2.0, 4.0].iter().enumerate() {
            levels.push(lev(&format!("o{i}"), *j, 700.0 * i as f64 + 3.0, Parity::Odd));
        }

        let set = LevelSet::new(&levels).unwrap();
        let generated: Vec<_> = generate(&set)
            .map(|c| (c.even.label.clone(), c.odd.label.clone()))
            .collect();

        let mut expected = Vec::new();
        for even in set.even() {
            for odd in set.odd() {
                let allowed = (even.j - odd.j).abs() <= 1.0 && !(even.j == 0.0 && odd.j == 0.0);
                if allowed {
                    expected.push((even.label.clone(), odd.label.clone()));
                }
            }
        }
        assert_eq!(generated, expected);
    }

    #[test]
    fn no_odd_levels_means_no_candidates() {
        let levels = vec![lev("E", 1.0, 0.0, Parity::Even)];
        assert!(pairs(&levels).is_empty());
    }

    #[test]
    fn allowed_range_for_zero_and_nonzero_j() {
        assert_eq!(allowed_odd_j_range(0.0), (1.0, 1.0));
        assert_eq!(allowed_odd_j_range(1.0), (0.0, 2.0));
        assert_eq!(allowed_odd_j_range(3.5), (2.5, 4.5));
    }
}
