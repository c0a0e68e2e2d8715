use super::assignment::Assignment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality category of an observed line.
///
/// The category records how the line was measured or processed and selects the
/// wavenumber tolerance used when matching it against predicted transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityCategory {
    P,
    L,
    G,
    I,
    F,
}

impl QualityCategory {
    pub const ALL: [QualityCategory; 5] = [
        QualityCategory::P,
        QualityCategory::L,
        QualityCategory::G,
        QualityCategory::I,
        QualityCategory::F,
    ];

    /// The single-letter tag used in line tables.
    pub fn code(self) -> char {
        match self {
            QualityCategory::P => 'P',
            QualityCategory::L => 'L',
            QualityCategory::G => 'G',
            QualityCategory::I => 'I',
            QualityCategory::F => 'F',
        }
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for QualityCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "P" => Ok(QualityCategory::P),
            "L" => Ok(QualityCategory::L),
            "G" => Ok(QualityCategory::G),
            "I" => Ok(QualityCategory::I),
            "F" => Ok(QualityCategory::F),
            _ => Err(()),
        }
    }
}

/// Operator annotations attached to a line while reviewing identifications.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTags {
    pub ringing: bool,
    pub incorrect_assignment: bool,
    pub noise: bool,
    pub blend: bool,
    /// Uncertainty (cm⁻¹) chosen by the operator in place of the measured one.
    pub user_uncertainty: Option<f64>,
}

impl LineTags {
    pub fn any_set(&self) -> bool {
        self.ringing
            || self.incorrect_assignment
            || self.noise
            || self.blend
            || self.user_uncertainty.is_some()
    }
}

/// Which assignment list of a [`Line`] a matching pass writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentTarget {
    /// Assignments from the element under study.
    Main,
    /// Assignments from every other (impurity) element.
    Other,
}

/// An observed spectral line together with its identifications.
///
/// Only `wavenumber`, `category` and the assignment lists take part in matching;
/// the measurement columns, tags and comments are carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Line position in cm⁻¹.
    pub wavenumber: f64,
    pub category: QualityCategory,
    pub snr: f64,
    pub fwhm: f64,
    pub eq_width: f64,
    /// Measured wavenumber uncertainty in cm⁻¹.
    pub uncertainty: f64,
    pub main_assignments: Vec<Assignment>,
    pub other_assignments: Vec<Assignment>,
    /// Identification picked by the operator among the proposed ones, if any.
    pub user_assignment: Option<Assignment>,
    pub tags: LineTags,
    pub comments: String,
}

impl Line {
    /// Creates a line with empty assignment lists and zeroed measurement columns.
    pub fn new(wavenumber: f64, category: QualityCategory) -> Self {
        Self {
            wavenumber,
            category,
            snr: 0.0,
            fwhm: 0.0,
            eq_width: 0.0,
            uncertainty: 0.0,
            main_assignments: Vec::new(),
            other_assignments: Vec::new(),
            user_assignment: None,
            tags: LineTags::default(),
            comments: String::new(),
        }
    }

    pub fn assignments(&self, target: AssignmentTarget) -> &[Assignment] {
        match target {
            AssignmentTarget::Main => &self.main_assignments,
            AssignmentTarget::Other => &self.other_assignments,
        }
    }

    pub fn assignments_mut(&mut self, target: AssignmentTarget) -> &mut Vec<Assignment> {
        match target {
            AssignmentTarget::Main => &mut self.main_assignments,
            AssignmentTarget::Other => &mut self.other_assignments,
        }
    }

    /// Returns `true` once any assignment on this line came from an ambiguous match,
    /// i.e. a predicted transition that had more than one line within tolerance.
    pub fn multiplicity(&self) -> bool {
        self.main_assignments
            .iter()
            .chain(&self.other_assignments)
            .any(|a| a.ambiguous)
    }

    /// Returns `true` if the element under study has at least one assignment here.
    pub fn is_matched(&self) -> bool {
        !self.main_assignments.is_empty()
    }
}
