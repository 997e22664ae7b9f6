
use log::trace;
use rustc_hash::FxHashMap as HashMap;
use std::path::Path;

use crate::util::file_io::load_delimited_rows;

/// Padded gene intervals from a BED file, merged per chromosome.
/// Coordinates are 0-based half-open like BED.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneRegions {
    /// chrom -> sorted, non-overlapping (start, end) intervals
    regions: HashMap<String, Vec<(u64, u64)>>
}

impl GeneRegions {
    /// Loads a BED file, applying padding on both sides of every interval.
    /// Rows with fewer than three columns or non-numeric coordinates are skipped.
    /// # Arguments
    /// * `filename` - the BED file, may be gzipped
    /// * `padding` - bases added to each side; starts are clamped at 0
    /// # Errors
    /// * if the file cannot be opened or read
    pub fn from_bed(filename: &Path, padding: u64) -> Result<GeneRegions, Box<dyn std::error::Error>> {
        let mut raw_regions: HashMap<String, Vec<(u64, u64)>> = Default::default();
        for row in load_delimited_rows(filename, b'\t')? {
            if row.len() < 3 || row[0].starts_with("track") || row[0].starts_with("browser") {
                trace!("Skipping BED row: {row:?}");
                continue;
            }
            let (start, end) = match (row[1].trim().parse::<u64>(), row[2].trim().parse::<u64>()) {
                (Ok(s), Ok(e)) => (s, e),
                _ => {
                    trace!("Skipping BED row with bad coordinates: {row:?}");
                    continue;
                }
            };
            raw_regions.entry(row[0].trim().to_string())
                .or_default()
                .push((start.saturating_sub(padding), end + padding));
        }

        let regions = raw_regions.into_iter()
            .map(|(chrom, intervals)| (chrom, merge_intervals(intervals)))
            .collect();
        Ok(GeneRegions {
            regions
        })
    }

    /// Returns true if [start, end) overlaps any region on the chromosome
    /// # Arguments
    /// * `chrom` - the chromosome name
    /// * `start` - 0-based start
    /// * `end` - 0-based exclusive end, must be > start
    pub fn overlaps(&self, chrom: &str, start: u64, end: u64) -> bool {
        let intervals = match self.regions.get(chrom) {
            Some(i) => i,
            None => return false
        };
        // first interval that ends after our start
        let index = intervals.partition_point(|&(_s, e)| e <= start);
        index < intervals.len() && intervals[index].0 < end
    }

    /// Total number of merged intervals
    pub fn num_intervals(&self) -> usize {
        self.regions.values().map(|v| v.len()).sum()
    }
}

/// Sorts and merges overlapping or touching intervals
fn merge_intervals(mut intervals: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    intervals.sort_unstable();
    let mut merged: Vec<(u64, u64)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals.into_iter() {
        match merged.last_mut() {
            Some(last) if start <= last.1 => {
                last.1 = last.1.max(end);
            },
            _ => merged.push((start, end))
        }
    }
    merged
}
