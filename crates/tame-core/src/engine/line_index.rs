use crate::core::models::line::{Line, QualityCategory};
use std::collections::BTreeMap;
use tracing::warn;

/// Position of a line inside the caller's line slice, keyed by its wavenumber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedLine {
    pub wavenumber: f64,
    pub index: usize,
}

/// Observed lines grouped by quality category, each group sorted by wavenumber.
///
/// The index stores copies of the wavenumbers together with the position of each
/// line in the slice it was built from, so it stays valid while the caller
/// mutates the assignment lists of those lines.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    partitions: BTreeMap<QualityCategory, Vec<IndexedLine>>,
}

impl LineIndex {
    /// Builds the index. Lines with a non-finite wavenumber cannot be ordered and
    /// are left out.
    pub fn build(lines: &[Line]) -> Self {
        let mut partitions: BTreeMap<QualityCategory, Vec<IndexedLine>> = BTreeMap::new();
        let mut skipped = 0usize;

        for (index, line) in lines.iter().enumerate() {
            if !line.wavenumber.is_finite() {
                skipped += 1;
                continue;
            }
            partitions
                .entry(line.category)
                .or_default()
                .push(IndexedLine {
                    wavenumber: line.wavenumber,
                    index,
                });
        }
        if skipped > 0 {
            warn!(
                skipped,
                "Lines with non-finite wavenumbers were left out of the line index."
            );
        }

        for partition in partitions.values_mut() {
            partition.sort_by(|a, b| a.wavenumber.total_cmp(&b.wavenumber));
        }

        Self { partitions }
    }

    /// Lines of `category` with wavenumber in `[center - half_width, center + half_width)`.
    ///
    /// The window is half-open: a line exactly at the lower edge is returned, a
    /// line exactly at the upper edge is not. Both edges are located by binary
    /// search for the first entry not below the edge value.
    pub fn range_query(
        &self,
        category: QualityCategory,
        center: f64,
        half_width: f64,
    ) -> &[IndexedLine] {
        let Some(partition) = self.partitions.get(&category) else {
            return &[];
        };
        let lower = center - half_width;
        let upper = center + half_width;

        let start = partition.partition_point(|e| e.wavenumber < lower);
        let end = partition.partition_point(|e| e.wavenumber < upper);
        &partition[start..end.max(start)]
    }

    pub fn len(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
