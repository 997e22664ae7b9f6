
use log::{info, trace};
use std::collections::BTreeMap;

use crate::data_types::record_annotation::{FilterSet, RecordAnnotation};
use crate::data_types::thresholds::FilterThresholds;
use crate::data_types::vcf_symbols::VcfInfo;
use crate::smlv::evidence::SmallVariantEvidence;
use crate::smlv::filter::{assign_filters, is_germline_leakage};
use crate::smlv::rescue::rescue_flags;

/// Runs the two classification phases on small variants: FILTER assignment followed by rescue
#[derive(Clone, Debug, Default)]
pub struct SmallVariantClassifier {
    /// The thresholds for every rule
    thresholds: FilterThresholds
}

impl SmallVariantClassifier {
    /// Constructor
    /// # Arguments
    /// * `thresholds` - the rule thresholds, assumed to be validated already
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self {
            thresholds
        }
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }

    /// Classifies a single record.
    /// The returned annotation holds the final FILTER set and every INFO flag to set.
    /// # Arguments
    /// * `evidence` - everything the rules need from the record
    pub fn classify(&self, evidence: &SmallVariantEvidence) -> RecordAnnotation {
        // phase 1: all rules that fire, on top of whatever was on the record already
        let mut rule_filters = FilterSet::default();
        assign_filters(evidence, &self.thresholds, &mut rule_filters);

        // germline leakage only considers the tags from our own rules
        let germline_leakage = is_germline_leakage(&rule_filters);

        let mut filters = FilterSet::from_existing(&evidence.existing_filters);
        filters.merge(&rule_filters);

        // phase 2: rescue only if it changes the outcome
        let rescues = if filters.is_pass() {
            vec![]
        } else {
            rescue_flags(&evidence.clinical, &self.thresholds)
        };
        if !rescues.is_empty() {
            trace!("Rescuing {filters} with {rescues:?}");
            filters.clear();
        }

        let mut annotation = RecordAnnotation::new(filters);
        if germline_leakage {
            annotation.set_flag(VcfInfo::GermlineLeakage);
        }
        for flag in rescues.into_iter() {
            annotation.set_flag(flag);
        }
        annotation
    }
}

/// Running tallies over all classified records
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClassificationStats {
    /// Total records seen
    pub num_records: usize,
    /// Records written with FILTER=PASS, including rescued ones
    pub num_pass: usize,
    /// Records with at least one filter after rescue
    pub num_filtered: usize,
    /// Records that had their filters cleared
    pub num_rescued: usize,
    /// Records flagged as germline leakage
    pub num_germline_leakage: usize,
    /// Count of each FILTER ID on filtered records
    pub filter_counts: BTreeMap<String, usize>,
    /// Count of each rescue flag
    pub rescue_counts: BTreeMap<String, usize>
}

impl ClassificationStats {
    /// Adds a classified record to the tallies
    pub fn add(&mut self, annotation: &RecordAnnotation) {
        self.num_records += 1;
        if annotation.filters().is_pass() {
            self.num_pass += 1;
        } else {
            self.num_filtered += 1;
            for filter_id in annotation.filters().ids() {
                *self.filter_counts.entry(filter_id.to_string()).or_insert(0) += 1;
            }
        }

        let rescues = annotation.rescue_flags();
        if !rescues.is_empty() {
            self.num_rescued += 1;
            for flag in rescues.into_iter() {
                *self.rescue_counts.entry(flag.to_string()).or_insert(0) += 1;
            }
        }

        if annotation.has_flag(VcfInfo::GermlineLeakage) {
            self.num_germline_leakage += 1;
        }
    }

    /// Reports the tallies at info level
    pub fn log_summary(&self) {
        info!("Classified {} records:", self.num_records);
        info!("\tPASS: {}", self.num_pass);
        info!("\tFiltered: {}", self.num_filtered);
        for (filter_id, count) in self.filter_counts.iter() {
            info!("\t\t{filter_id}: {count}");
        }
        info!("\tRescued: {}", self.num_rescued);
        for (flag, count) in self.rescue_counts.iter() {
            info!("\t\t{flag}: {count}");
        }
        info!("\tGermline leakage: {}", self.num_germline_leakage);
    }
}
