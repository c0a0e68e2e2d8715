use super::tables::TableError;
use crate::core::models::assignment::join_designations;
use crate::core::models::line::Line;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADER: [&str; 8] = [
    "wavenumber",
    "snr",
    "fwhm",
    "eq_width",
    "fit",
    "unc",
    "main_element",
    "other_elements",
];

/// Separator between designations inside one exported cell.
const DESIGNATION_SEPARATOR: &str = "\t";

/// Which lines an exported linelist contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// Only lines with at least one main-element identification.
    #[default]
    Matched,
    /// Every line, identified or not.
    Complete,
}

/// Writes the linelist with each line's identifications as designation strings.
///
/// The `fit` column carries the line's quality category letter.
///
/// Returns the number of lines written.
pub fn write_linelist(
    lines: &[Line],
    mode: ExportMode,
    writer: impl Write,
) -> Result<usize, TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let mut written = 0;
    for line in lines
        .iter()
        .filter(|l| mode == ExportMode::Complete || l.is_matched())
    {
        csv_writer.write_record([
            format!("{:.4}", line.wavenumber),
            format!("{:.0}", line.snr),
            format!("{:.0}", line.fwhm),
            format!("{:.0}", line.eq_width),
            line.category.to_string(),
            format!("{:.4}", line.uncertainty),
            join_designations(&line.main_assignments, DESIGNATION_SEPARATOR),
            join_designations(&line.other_assignments, DESIGNATION_SEPARATOR),
        ])?;
        written += 1;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(written)
}

pub fn write_linelist_to_path(
    lines: &[Line],
    mode: ExportMode,
    path: &Path,
) -> Result<usize, TableError> {
    let file = File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_linelist(lines, mode, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::assignment::Assignment;
    use crate::core::models::line::QualityCategory;

    fn sample_lines() -> Vec<Line> {
        let mut matched = Line::new(25000.123456, QualityCategory::L);
        matched.snr = 123.4;
        matched.fwhm = 150.6;
        matched.eq_width = 999.6;
        matched.uncertainty = 0.00234;
        matched.main_assignments = vec![
            Assignment::new("Fe II", "z6D4.5", "a6D4.5"),
            Assignment::new("Fe II", "z4F3.5", "a4F2.5"),
        ];
        matched.other_assignments = vec![Assignment::new("Ar II", "4p", "4s")];

        let unmatched = Line::new(26000.0, QualityCategory::P);
        vec![matched, unmatched]
    }

    fn export(mode: ExportMode) -> (usize, String) {
        let mut buffer = Vec::new();
        let written = write_linelist(&sample_lines(), mode, &mut buffer).unwrap();
        (written, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn matched_export_contains_only_identified_lines() {
        let (written, content) = export(ExportMode::Matched);
        let rows: Vec<_> = content.lines().collect();

        assert_eq!(written, 1);
        assert_eq!(
            rows[0],
            "wavenumber,snr,fwhm,eq_width,fit,unc,main_element,other_elements"
        );
        assert_eq!(
            rows[1],
            "25000.1235,123,151,1000,L,0.0023,Fe II: z6D4.5 - a6D4.5\tFe II: z4F3.5 - a4F2.5,Ar II: 4p - 4s"
        );
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn complete_export_includes_unidentified_lines() {
        let (written, content) = export(ExportMode::Complete);
        let rows: Vec<_> = content.lines().collect();

        assert_eq!(written, 2);
        assert_eq!(rows[2], "26000.0000,0,0,0,P,0.0000,,");
    }
}
