//! Writers for the input files of the LOPT level-optimization program.
//!
//! LOPT reads three files for a project: the line list (`.inp`) with one record per
//! identified transition, the fixed levels (`.fixed`), and a parameter file (`.par`)
//! naming the other files. All three are fixed-column text formats.

use crate::core::models::level::Level;
use crate::core::models::line::Line;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

/// Uncertainty written for a fixed level at zero energy (the ground level).
const GROUND_LEVEL_UNCERTAINTY: f64 = 0.0;
/// Uncertainty written for any other fixed level.
const FIXED_LEVEL_UNCERTAINTY: f64 = 2.0;
/// Number of leading template lines that carry a file name.
const PAR_FILE_LINES: usize = 4;

#[derive(Debug, Error)]
pub enum LoptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No lines are identified for the main element; run line matching first")]
    NoMatchedLines,
    #[error("Fixed level '{0}' is not in the level list")]
    UnknownLevel(String),
    #[error("LOPT parameter template has {found} lines; at least {required} are needed", required = PAR_FILE_LINES)]
    TemplateTooShort { found: usize },
}

/// File names LOPT expects for a project, derived from the element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoptFileNames {
    pub inp: String,
    pub fixed: String,
    pub lev: String,
    pub lin: String,
    pub par: String,
}

impl LoptFileNames {
    pub fn for_element(element: &str) -> Self {
        Self {
            inp: format!("{element}_lopt.inp"),
            fixed: format!("{element}_lopt.fixed"),
            lev: format!("{element}_lopt.lev"),
            lin: format!("{element}_lopt.lin"),
            par: format!("{element}_lopt.par"),
        }
    }
}

/// Record flag in the last column of a `.inp` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoptFlag {
    None,
    /// `Q`: the line has several competing identifications.
    Questionable,
    /// `B`: the line carries operator tags and is down-weighted.
    Blended,
}

impl LoptFlag {
    fn column(self) -> &'static str {
        match self {
            LoptFlag::None => "       ",
            LoptFlag::Questionable => "       Q",
            LoptFlag::Blended => "       B",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoptRecord {
    pub snr: f64,
    pub wavenumber: f64,
    pub uncertainty: f64,
    pub lower_level: String,
    pub upper_level: String,
    pub flag: LoptFlag,
}

impl fmt::Display for LoptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:9.0}{:15.4} cm-1 {:.4}{:>12}{:>12}{}",
            self.snr,
            self.wavenumber,
            self.uncertainty,
            self.lower_level,
            self.upper_level,
            self.flag.column()
        )
    }
}

/// Settings for building `.inp` records.
#[derive(Debug, Clone, PartialEq)]
pub struct LoptSettings {
    pub main_element: String,
    /// Uncertainty (cm⁻¹) used for questionable or tagged lines.
    pub default_uncertainty: f64,
}

/// Builds the `.inp` records for every line identified for the main element.
///
/// A line with an operator-chosen identification yields that single record, and
/// only when it belongs to the main element. Otherwise one record is written per
/// main-element assignment; lines with other than exactly one main assignment, or
/// with impurity assignments, get the default uncertainty and the `Q` flag.
pub fn records(lines: &[Line], settings: &LoptSettings) -> Vec<LoptRecord> {
    let mut records = Vec::new();

    for line in lines.iter().filter(|l| l.is_matched()) {
        let any_tag = line.tags.any_set() || line.multiplicity();
        let make = |upper: &str, lower: &str, uncertainty: f64, flag: LoptFlag| LoptRecord {
            snr: line.snr,
            wavenumber: line.wavenumber,
            uncertainty,
            lower_level: lower.to_string(),
            upper_level: upper.to_string(),
            flag,
        };

        if let Some(user) = &line.user_assignment {
            if user.element != settings.main_element {
                continue;
            }
            let (uncertainty, flag) = if !any_tag {
                (line.uncertainty, LoptFlag::None)
            } else if let Some(user_unc) = line.tags.user_uncertainty {
                (user_unc, LoptFlag::Blended)
            } else if line.multiplicity() {
                (line.uncertainty, LoptFlag::None)
            } else {
                (settings.default_uncertainty, LoptFlag::Blended)
            };
            records.push(make(&user.upper_level, &user.lower_level, uncertainty, flag));
            continue;
        }

        let (uncertainty, flag) =
            if line.main_assignments.len() != 1 || !line.other_assignments.is_empty() {
                (settings.default_uncertainty, LoptFlag::Questionable)
            } else if !any_tag {
                (line.uncertainty, LoptFlag::None)
            } else if let Some(user_unc) = line.tags.user_uncertainty {
                (user_unc, LoptFlag::Blended)
            } else {
                (settings.default_uncertainty, LoptFlag::Blended)
            };
        for assignment in &line.main_assignments {
            records.push(make(
                &assignment.upper_level,
                &assignment.lower_level,
                uncertainty,
                flag,
            ));
        }
    }
    records
}

/// Writes the `.inp` file. Returns the number of records written.
pub fn write_inp(
    lines: &[Line],
    settings: &LoptSettings,
    writer: &mut impl Write,
) -> Result<usize, LoptError> {
    if !lines.iter().any(Line::is_matched) {
        return Err(LoptError::NoMatchedLines);
    }
    let records = records(lines, settings);
    for record in &records {
        writeln!(writer, "{record}")?;
    }
    Ok(records.len())
}

/// Writes the `.fixed` file: one row per fixed level label, in the given order.
pub fn write_fixed(
    levels: &[Level],
    fixed_labels: &[String],
    writer: &mut impl Write,
) -> Result<(), LoptError> {
    for label in fixed_labels {
        let level = levels
            .iter()
            .find(|l| &l.label == label)
            .ok_or_else(|| LoptError::UnknownLevel(label.clone()))?;
        let uncertainty = if level.energy == 0.0 {
            GROUND_LEVEL_UNCERTAINTY
        } else {
            FIXED_LEVEL_UNCERTAINTY
        };
        writeln!(
            writer,
            "{:>9}{:>13.4}{:>13}",
            level.label,
            level.energy,
            format!("{uncertainty:.4}")
        )?;
    }
    Ok(())
}

/// Writes the `.par` file from a template, prefixing its first four lines with the
/// project's `.inp`, `.fixed`, `.lev` and `.lin` file names.
pub fn write_par(template: &str, element: &str, writer: &mut impl Write) -> Result<(), LoptError> {
    let lines: Vec<&str> = template.split_inclusive('\n').collect();
    if lines.len() < PAR_FILE_LINES {
        return Err(LoptError::TemplateTooShort { found: lines.len() });
    }

    let names = LoptFileNames::for_element(element);
    let prefixes = [&names.inp, &names.fixed, &names.lev, &names.lin];
    for (i, line) in lines.iter().enumerate() {
        if let Some(prefix) = prefixes.get(i) {
            write!(writer, "{prefix}")?;
        }
        write!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assignment::Assignment;
    use crate::core::models::level::Parity;
    use crate::core::models::line::QualityCategory;

    fn settings() -> LoptSettings {
        LoptSettings {
            main_element: "Fe II".to_string(),
            default_uncertainty: 0.025,
        }
    }

    fn line(wavenumber: f64, main: &[(&str, &str)]) -> Line {
        let mut line = Line::new(wavenumber, QualityCategory::L);
        line.snr = 250.0;
        line.uncertainty = 0.0012;
        line.main_assignments = main
            .iter()
            .map(|(u, l)| Assignment::new("Fe II", u, l))
            .collect();
        line
    }

    fn single(lines: &[Line]) -> LoptRecord {
        let mut records = records(lines, &settings());
        assert_eq!(records.len(), 1);
        records.remove(0)
    }

    #[test]
    fn record_uses_fixed_columns() {
        let record = LoptRecord {
            snr: 1234.0,
            wavenumber: 12345.6789,
            uncertainty: 0.0023,
            lower_level: "a".to_string(),
            upper_level: "b".to_string(),
            flag: LoptFlag::None,
        };
        let expected = format!(
            "{}1234{}12345.6789 cm-1 0.0023{}a{}b{}",
            " ".repeat(5),
            " ".repeat(5),
            " ".repeat(11),
            " ".repeat(11),
            " ".repeat(7)
        );
        assert_eq!(record.to_string(), expected);

        let flagged = LoptRecord {
            flag: LoptFlag::Questionable,
            ..record
        };
        assert!(flagged.to_string().ends_with("       Q"));
    }

    #[test]
    fn clean_single_identification_keeps_measured_uncertainty() {
        let record = single(&[line(100.0, &[("z", "a")])]);
        assert_eq!(record.uncertainty, 0.0012);
        assert_eq!(record.flag, LoptFlag::None);
        assert_eq!(record.upper_level, "z");
        assert_eq!(record.lower_level, "a");
    }

    #[test]
    fn several_main_identifications_are_questionable() {
        let records = records(&[line(100.0, &[("z", "a"), ("y", "b")])], &settings());
        assert_eq!(records.len(), 2);
        for record in records {
            assert_eq!(record.uncertainty, 0.025);
            assert_eq!(record.flag, LoptFlag::Questionable);
        }
    }

    #[test]
    fn impurity_identification_makes_line_questionable() {
        let mut l = line(100.0, &[("z", "a")]);
        l.other_assignments.push(Assignment::new("Ar II", "u", "l"));
        assert_eq!(single(&[l]).flag, LoptFlag::Questionable);
    }

    #[test]
    fn operator_uncertainty_is_used_with_blend_flag() {
        let mut l = line(100.0, &[("z", "a")]);
        l.tags.user_uncertainty = Some(0.01);
        let record = single(&[l]);
        assert_eq!(record.uncertainty, 0.01);
        assert_eq!(record.flag, LoptFlag::Blended);
    }

    #[test]
    fn ambiguous_or_tagged_line_gets_default_uncertainty() {
        let mut ambiguous = line(100.0, &[("z", "a")]);
        ambiguous.main_assignments[0].ambiguous = true;
        let record = single(&[ambiguous]);
        assert_eq!(record.uncertainty, 0.025);
        assert_eq!(record.flag, LoptFlag::Blended);

        let mut noisy = line(100.0, &[("z", "a")]);
        noisy.tags.noise = true;
        assert_eq!(single(&[noisy]).flag, LoptFlag::Blended);
    }

    #[test]
    fn operator_identification_replaces_proposed_ones() {
        let mut l = line(100.0, &[("z", "a"), ("y", "b")]);
        l.user_assignment = Some(Assignment::new("Fe II", "y", "b"));
        let record = single(&[l]);
        assert_eq!(record.upper_level, "y");
        assert_eq!(record.uncertainty, 0.0012);
        assert_eq!(record.flag, LoptFlag::None);
    }

    #[test]
    fn operator_identification_of_ambiguous_line_keeps_measured_uncertainty() {
        let mut l = line(100.0, &[("z", "a")]);
        l.main_assignments[0].ambiguous = true;
        l.user_assignment = Some(Assignment::new("Fe II", "z", "a"));
        let record = single(&[l]);
        assert_eq!(record.uncertainty, 0.0012);
        assert_eq!(record.flag, LoptFlag::None);
    }

    #[test]
    fn operator_identification_of_ambiguous_tagged_line_keeps_measured_uncertainty() {
        let mut l = line(100.0, &[("z", "a")]);
        l.main_assignments[0].ambiguous = true;
        l.tags.noise = true;
        l.user_assignment = Some(Assignment::new("Fe II", "z", "a"));
        let record = single(&[l]);
        assert_eq!(record.uncertainty, 0.0012);
        assert_eq!(record.flag, LoptFlag::None);
    }

    #[test]
    fn operator_identification_of_tagged_line_gets_default_uncertainty() {
        let mut l = line(100.0, &[("z", "a")]);
        l.tags.blend = true;
        l.user_assignment = Some(Assignment::new("Fe II", "z", "a"));
        let record = single(&[l]);
        assert_eq!(record.uncertainty, 0.025);
        assert_eq!(record.flag, LoptFlag::Blended);
    }

    #[test]
    fn operator_identification_for_other_element_is_skipped() {
        let mut l = line(100.0, &[("z", "a")]);
        l.user_assignment = Some(Assignment::new("Ar II", "u", "l"));
        assert!(records(&[l], &settings()).is_empty());
    }

    #[test]
    fn write_inp_requires_matched_lines() {
        let mut buffer = Vec::new();
        let unmatched = vec![Line::new(100.0, QualityCategory::P)];
        assert!(matches!(
            write_inp(&unmatched, &settings(), &mut buffer),
            Err(LoptError::NoMatchedLines)
        ));

        let matched = vec![line(100.0, &[("z", "a")]), line(200.0, &[("y", "a")])];
        let written = write_inp(&matched, &settings(), &mut buffer).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 2);
    }

    #[test]
    fn fixed_file_marks_ground_level_exact() {
        let levels = vec![
            Level::new("a6D4.5", 4.5, 0.0, Parity::Even),
            Level::new("z6D4.5", 4.5, 38458.9934, Parity::Odd),
        ];
        let mut buffer = Vec::new();
        write_fixed(
            &levels,
            &["a6D4.5".to_string(), "z6D4.5".to_string()],
            &mut buffer,
        )
        .unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let rows: Vec<_> = content.lines().collect();
        assert_eq!(rows[0], format!("{:>9}{:>13}{:>13}", "a6D4.5", "0.0000", "0.0000"));
        assert_eq!(rows[1], format!("{:>9}{:>13}{:>13}", "z6D4.5", "38458.9934", "2.0000"));
    }

    #[test]
    fn fixed_file_rejects_unknown_level() {
        let mut buffer = Vec::new();
        let err = write_fixed(&[], &["nope".to_string()], &mut buffer).unwrap_err();
        assert!(matches!(err, LoptError::UnknownLevel(ref l) if l == "nope"));
    }

    #[test]
    fn par_file_prefixes_first_four_lines() {
        let template = "   ! inp\n   ! fixed\n   ! lev\n   ! lin\nITERATIONS 10\n";
        let mut buffer = Vec::new();
        write_par(template, "Fe II", &mut buffer).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert_eq!(
            content,
            "Fe II_lopt.inp   ! inp\nFe II_lopt.fixed   ! fixed\nFe II_lopt.lev   ! lev\nFe II_lopt.lin   ! lin\nITERATIONS 10\n"
        );
    }

    #[test]
    fn par_template_needs_four_lines() {
        let mut buffer = Vec::new();
        assert!(matches!(
            write_par("one\ntwo\n", "X", &mut buffer),
            Err(LoptError::TemplateTooShort { found: 2 })
        ));
    }
}
