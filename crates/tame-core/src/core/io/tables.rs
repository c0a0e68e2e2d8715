use crate::core::models::level::{Level, Parity};
use crate::core::models::line::{Line, QualityCategory};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid parity code {value} for level '{label}' (expected 1 for even or 0 for odd)")]
    InvalidParity { label: String, value: f64 },
    #[error("Unknown quality category '{tag}' for line at {wavenumber} cm-1")]
    UnknownCategory { wavenumber: f64, tag: String },
}

/// One row of a level table: `label,j,energy,parity`.
#[derive(Debug, Serialize, Deserialize)]
struct LevelRecord {
    label: String,
    j: f64,
    energy: f64,
    parity: f64,
}

/// One row of a line table: `wavenumber,snr,fwhm,eq width,tags,unc`.
///
/// `tags` holds the quality category letter. Headers written by spectrum fitting
/// tools (`peak`, `width`, `eq_width`, `tag`) are accepted as well.
#[derive(Debug, Serialize, Deserialize)]
struct LineRecord {
    wavenumber: f64,
    #[serde(alias = "peak")]
    snr: f64,
    #[serde(alias = "width")]
    fwhm: f64,
    #[serde(rename = "eq width", alias = "eq_width")]
    eq_width: f64,
    #[serde(rename = "tags", alias = "tag")]
    tag: String,
    unc: f64,
}

impl TryFrom<LevelRecord> for Level {
    type Error = TableError;

    fn try_from(record: LevelRecord) -> Result<Self, Self::Error> {
        let parity = Parity::from_code(record.parity).ok_or_else(|| TableError::InvalidParity {
            label: record.label.clone(),
            value: record.parity,
        })?;
        Ok(Level {
            label: record.label,
            j: record.j,
            energy: record.energy,
            parity,
        })
    }
}

impl TryFrom<LineRecord> for Line {
    type Error = TableError;

    fn try_from(record: LineRecord) -> Result<Self, Self::Error> {
        let category = record
            .tag
            .parse::<QualityCategory>()
            .map_err(|_| TableError::UnknownCategory {
                wavenumber: record.wavenumber,
                tag: record.tag.clone(),
            })?;
        let mut line = Line::new(record.wavenumber, category);
        line.snr = record.snr;
        line.fwhm = record.fwhm;
        line.eq_width = record.eq_width;
        line.uncertainty = record.unc;
        Ok(line)
    }
}

impl From<&Line> for LineRecord {
    fn from(line: &Line) -> Self {
        Self {
            wavenumber: line.wavenumber,
            snr: line.snr,
            fwhm: line.fwhm,
            eq_width: line.eq_width,
            tag: line.category.to_string(),
            unc: line.uncertainty,
        }
    }
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);
    builder
}

fn open(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

fn create(path: &Path) -> Result<File, TableError> {
    File::create(path).map_err(|e| TableError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Reads a level table. Rows are returned in file order; blank labels are kept so
/// that validation can report them.
pub fn read_levels(reader: impl Read) -> Result<Vec<Level>, TableError> {
    let mut csv_reader = reader_builder().from_reader(reader);
    csv_reader
        .deserialize::<LevelRecord>()
        .map(|record| Level::try_from(record?))
        .collect()
}

pub fn read_levels_from_path(path: &Path) -> Result<Vec<Level>, TableError> {
    read_levels(open(path)?)
}

pub fn write_levels(levels: &[Level], writer: impl Write) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for level in levels {
        csv_writer.serialize(LevelRecord {
            label: level.label.clone(),
            j: level.j,
            energy: level.energy,
            parity: f64::from(level.parity.code()),
        })?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_levels_to_path(levels: &[Level], path: &Path) -> Result<(), TableError> {
    write_levels(levels, create(path)?)
}

/// Reads a line table and returns the lines sorted ascending by wavenumber, with
/// empty assignment lists.
pub fn read_lines(reader: impl Read) -> Result<Vec<Line>, TableError> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let mut lines = csv_reader
        .deserialize::<LineRecord>()
        .map(|record| Line::try_from(record?))
        .collect::<Result<Vec<_>, _>>()?;
    lines.sort_by(|a, b| a.wavenumber.total_cmp(&b.wavenumber));
    Ok(lines)
}

pub fn read_lines_from_path(path: &Path) -> Result<Vec<Line>, TableError> {
    read_lines(open(path)?)
}

/// Writes the measurement columns of `lines`; assignments are not part of the table.
pub fn write_lines(lines: &[Line], writer: impl Write) -> Result<(), TableError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for line in lines {
        csv_writer.serialize(LineRecord::from(line))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_lines_to_path(lines: &[Line], path: &Path) -> Result<(), TableError> {
    write_lines(lines, create(path)?)
}
