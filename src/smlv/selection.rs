
use log::warn;

use crate::data_types::record_annotation::{FilterSet, RecordAnnotation};
use crate::data_types::thresholds::SelectionThresholds;
use crate::data_types::vcf_symbols::VcfFilter;

/// The selection stages, from least to most aggressive
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::Display)]
pub enum SelectionStage {
    /// Under the cap, nothing is excluded
    All,
    /// Exclude records that are not PASS
    NonPass,
    /// Exclude population-common records
    PopulationCommon,
    /// Exclude records outside of cancer genes
    NonCancerGene
}

/// The exclusion stages in the order they are tried
pub const SELECTION_CASCADE: [SelectionStage; 3] = [
    SelectionStage::NonPass,
    SelectionStage::PopulationCommon,
    SelectionStage::NonCancerGene
];

impl SelectionStage {
    /// The FILTER tag for records excluded at this stage
    pub fn filter(self) -> Option<VcfFilter> {
        match self {
            SelectionStage::All => None,
            SelectionStage::NonPass => Some(VcfFilter::MaxVariantsNonPass),
            SelectionStage::PopulationCommon => Some(VcfFilter::MaxVariantsGnomad),
            SelectionStage::NonCancerGene => Some(VcfFilter::MaxVariantsNonCancerGenes)
        }
    }

    /// Returns true if a record is kept by this stage; hotspots are always kept.
    /// Each stage is judged on the original record only, stages do not stack.
    /// # Arguments
    /// * `summary` - the record summary
    /// * `thresholds` - selection thresholds, only the population AF is used here
    pub fn retains(self, summary: &SelectionSummary, thresholds: &SelectionThresholds) -> bool {
        summary.hotspot || match self {
            SelectionStage::All => true,
            SelectionStage::NonPass => summary.is_pass,
            SelectionStage::PopulationCommon => summary.gnomad_af < thresholds.max_gnomad_af,
            SelectionStage::NonCancerGene => summary.in_cancer_gene
        }
    }
}

/// What selection needs to know about a record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSummary {
    /// The FILTER values on the input record
    pub existing_filters: Vec<String>,
    /// FILTER is PASS or missing
    pub is_pass: bool,
    /// INFO/HOTSPOT is set
    pub hotspot: bool,
    /// INFO/gnomAD_AF, 0.0 when absent
    pub gnomad_af: f64,
    /// Overlaps a padded cancer gene interval
    pub in_cancer_gene: bool
}

/// Counts the records each stage would retain
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionCounts {
    /// Total records in the input
    pub num_records: usize,
    /// Retained counts in [`SELECTION_CASCADE`] order
    pub retained: [usize; 3]
}

impl SelectionCounts {
    /// Adds one record to every stage count
    pub fn add(&mut self, summary: &SelectionSummary, thresholds: &SelectionThresholds) {
        self.num_records += 1;
        for (i, stage) in SELECTION_CASCADE.iter().enumerate() {
            if stage.retains(summary, thresholds) {
                self.retained[i] += 1;
            }
        }
    }

    /// Number of records a stage would retain
    pub fn num_retained(&self, stage: SelectionStage) -> usize {
        match SELECTION_CASCADE.iter().position(|&s| s == stage) {
            Some(i) => self.retained[i],
            None => self.num_records
        }
    }
}

/// Picks the least aggressive stage that brings the count within the cap.
/// If none does, the last stage is used anyway.
/// # Arguments
/// * `counts` - the per-stage retained counts
/// * `max_variants` - the cap on retained records
pub fn choose_selection_stage(counts: &SelectionCounts, max_variants: usize) -> SelectionStage {
    if counts.num_records <= max_variants {
        return SelectionStage::All;
    }
    for &stage in SELECTION_CASCADE.iter() {
        if counts.num_retained(stage) <= max_variants {
            return stage;
        }
    }
    let last_stage = SelectionStage::NonCancerGene;
    warn!(
        "Variant count is still {} after the {last_stage} stage, exceeding the maximum of {max_variants}",
        counts.num_retained(last_stage)
    );
    last_stage
}

/// Applies a stage to one record.
/// Returns the annotation for the selected output, and whether the record is retained.
/// Missing FILTER values are normalised to PASS.
/// # Arguments
/// * `stage` - the chosen stage
/// * `summary` - the record summary
/// * `thresholds` - selection thresholds
pub fn select_record(stage: SelectionStage, summary: &SelectionSummary, thresholds: &SelectionThresholds) -> (RecordAnnotation, bool) {
    let mut filters = FilterSet::from_existing(&summary.existing_filters);
    let retained = stage.retains(summary, thresholds);
    if !retained {
        if let Some(filter) = stage.filter() {
            filters.add(filter);
        }
    }
    (RecordAnnotation::new(filters), retained)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(is_pass: bool, hotspot: bool, gnomad_af: f64, in_cancer_gene: bool) -> SelectionSummary {
        SelectionSummary {
            existing_filters: if is_pass { vec![] } else { vec!["min_AF".to_string()] },
            is_pass, hotspot, gnomad_af, in_cancer_gene
        }
    }

    #[test]
    fn test_stage_retains() {
        let thresholds = SelectionThresholds::default();
        let filtered_common = summary(false, false, 0.05, false);
        for stage in SELECTION_CASCADE {
            assert!(!stage.retains(&filtered_common, &thresholds));
        }
        assert!(SelectionStage::All.retains(&filtered_common, &thresholds));

        // hotspots are always kept
        let hotspot = summary(false, true, 0.05, false);
        for stage in SELECTION_CASCADE {
            assert!(stage.retains(&hotspot, &thresholds));
        }

        // stages are independent of each other
        let pass_common = summary(true, false, 0.01, true);
        assert!(SelectionStage::NonPass.retains(&pass_common, &thresholds));
        assert!(!SelectionStage::PopulationCommon.retains(&pass_common, &thresholds));
        assert!(SelectionStage::NonCancerGene.retains(&pass_common, &thresholds));
    }

    #[test]
    fn test_choose_stage() {
        let thresholds = SelectionThresholds::default();
        let records = [
            summary(true, false, 0.0, true),
            summary(true, false, 0.02, true),
            summary(false, false, 0.0, false),
            summary(false, false, 0.0, true),
            summary(true, false, 0.0, false),
        ];
        let mut counts = SelectionCounts::default();
        for r in records.iter() {
            counts.add(r, &thresholds);
        }
        assert_eq!(counts.num_records, 5);
        assert_eq!(counts.num_retained(SelectionStage::NonPass), 3);
        assert_eq!(counts.num_retained(SelectionStage::PopulationCommon), 4);
        assert_eq!(counts.num_retained(SelectionStage::NonCancerGene), 3);
        assert_eq!(counts.num_retained(SelectionStage::All), 5);

        assert_eq!(choose_selection_stage(&counts, 5), SelectionStage::All);
        assert_eq!(choose_selection_stage(&counts, 4), SelectionStage::NonPass);
        assert_eq!(choose_selection_stage(&counts, 3), SelectionStage::NonPass);
        // nothing gets below 3, so the last stage is used
        assert_eq!(choose_selection_stage(&counts, 2), SelectionStage::NonCancerGene);
    }

    #[test]
    fn test_choose_skips_stage() {
        let thresholds = SelectionThresholds::default();
        let mut counts = SelectionCounts::default();
        // all PASS, so the first stage removes nothing
        counts.add(&summary(true, false, 0.0, false), &thresholds);
        counts.add(&summary(true, false, 0.5, false), &thresholds);
        assert_eq!(choose_selection_stage(&counts, 1), SelectionStage::PopulationCommon);
    }

    #[test]
    fn test_select_record() {
        let thresholds = SelectionThresholds::default();
        let record = summary(false, false, 0.0, true);
        let (annotation, retained) = select_record(SelectionStage::NonPass, &record, &thresholds);
        assert!(!retained);
        assert_eq!(annotation.filters().ids(), vec!["min_AF", "max_variants_non_pass"]);

        let (annotation, retained) = select_record(SelectionStage::NonCancerGene, &record, &thresholds);
        assert!(retained);
        assert_eq!(annotation.filters().ids(), vec!["min_AF"]);

        // missing FILTER comes out as PASS
        let record = SelectionSummary {
            existing_filters: vec![".".to_string()],
            is_pass: true,
            ..Default::default()
        };
        let (annotation, retained) = select_record(SelectionStage::All, &record, &thresholds);
        assert!(retained);
        assert_eq!(annotation.filters().ids(), vec!["PASS"]);

        let record = summary(true, false, 0.3, false);
        let (annotation, retained) = select_record(SelectionStage::PopulationCommon, &record, &thresholds);
        assert!(!retained);
        assert_eq!(annotation.filters().ids(), vec!["max_variants_gnomad"]);
    }
}
