
use itertools::Itertools;
use log::{info, trace};
use std::collections::{BTreeMap, BTreeSet};

use crate::data_types::record_annotation::RecordAnnotation;
use crate::data_types::vcf_symbols::VcfInfo;
use crate::reference::SvReferenceData;
use crate::sv::annotation::parse_annotations;
use crate::sv::errors::SvAnnotationError;
use crate::sv::tiering::{CopyNumber, SvTier, TierContext, assign_lof_tier, assign_tier};

/// Effect label for a record with no ANN field
pub const NO_FUNCTIONAL_EFFECT: &str = "no_func_effect";
/// Effect label for a record where no annotation survived parsing
pub const NO_PRIORITY_EFFECT: &str = "no_prio_effect";
/// Detail label of the sentinel annotations
const SENTINEL_DETAIL: &str = "unprioritized";
/// Effect label of LOF derived annotations
const LOF_EFFECT: &str = "LOF";

/// The INFO values the prioritization reads from one SV record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvRecordEvidence {
    /// INFO/SVTYPE, empty if absent
    pub sv_type: String,
    /// INFO/ANN values, None if the field is absent
    pub annotations: Option<Vec<String>>,
    /// INFO/LOF values, e.g. "(GRK7|ENSG00000114124|1|1.00)"
    pub lof: Vec<String>,
    /// INFO/PURPLE_CN values, None if the field is absent
    pub copy_numbers: Option<Vec<f64>>
}

/// One entry of the simplified annotation.
/// Field order matches the output order, so the derived ordering sorts output lexically.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SimpleAnnotation {
    pub sv_type: String,
    /// '&'-joined effects
    pub effects: String,
    /// '&'-joined genes
    pub genes: String,
    /// '&'-joined transcripts with exon rank suffix
    pub transcripts: String,
    pub detail: String,
    pub tier: SvTier
}

impl SimpleAnnotation {
    fn sentinel(sv_type: &str, effect: &str) -> SimpleAnnotation {
        SimpleAnnotation {
            sv_type: sv_type.to_string(),
            effects: effect.to_string(),
            genes: String::new(),
            transcripts: String::new(),
            detail: SENTINEL_DETAIL.to_string(),
            tier: SvTier::TIER_4
        }
    }
}

impl std::fmt::Display for SimpleAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}|{}|{}|{}", self.sv_type, self.effects, self.genes, self.transcripts, self.detail, self.tier)
    }
}

/// Grouping key for annotation units that simplify to the same event
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct EventKey {
    sv_type: String,
    effects: BTreeSet<String>,
    genes: BTreeSet<String>,
    detail: String,
    tier: SvTier
}

fn join_set(values: &BTreeSet<String>) -> String {
    values.iter().join("&")
}

/// The outcome for one SV record
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SvPrioritization {
    /// Sorted, de-duplicated simplified annotations
    annotations: Vec<SimpleAnnotation>,
    /// The lowest tier value across all annotations
    top_tier: SvTier
}

impl SvPrioritization {
    pub fn annotations(&self) -> &[SimpleAnnotation] {
        &self.annotations
    }

    pub fn top_tier(&self) -> SvTier {
        self.top_tier
    }

    /// Converts to the INFO values to write, SIMPLE_ANN and SV_TOP_TIER
    pub fn to_record_annotation(&self) -> RecordAnnotation {
        let mut annotation = RecordAnnotation::default();
        annotation.set_strings(
            VcfInfo::SimpleAnn,
            self.annotations.iter().map(|a| a.to_string()).collect()
        );
        annotation.set_integer(VcfInfo::SvTopTier, self.top_tier.value() as i32);
        annotation
    }
}

/// Pulls the gene names out of LOF values, "(GRK7|ENSG00000114124|1|1.00)" -> "GRK7"
pub fn parse_lof_genes<S: AsRef<str>>(lof: &[S]) -> BTreeSet<String> {
    lof.iter()
        .filter_map(|l| {
            let gene = l.as_ref()
                .trim_matches(|c| c == '(' || c == ')')
                .split('|')
                .next()
                .unwrap_or_default();
            if gene.is_empty() {
                None
            } else {
                Some(gene.to_string())
            }
        })
        .collect()
}

/// Reduces SV annotations to simplified annotations and a top tier using the loaded reference data
pub struct SvPrioritizer {
    /// Gene, fusion, and transcript lists
    reference: SvReferenceData
}

impl SvPrioritizer {
    /// Constructor
    /// # Arguments
    /// * `reference` - the fully loaded reference data
    pub fn new(reference: SvReferenceData) -> Self {
        Self {
            reference
        }
    }

    /// Prioritizes a single record
    /// # Arguments
    /// * `evidence` - the INFO values of the record
    /// # Errors
    /// * if any annotation entry violates the annotation contract
    pub fn prioritize(&self, evidence: &SvRecordEvidence) -> Result<SvPrioritization, SvAnnotationError> {
        let entries = match evidence.annotations.as_ref() {
            Some(e) if !e.is_empty() => e,
            _ => {
                // nothing to prioritize, LOF is ignored as well
                return Ok(SvPrioritization {
                    annotations: vec![SimpleAnnotation::sentinel(&evidence.sv_type, NO_FUNCTIONAL_EFFECT)],
                    top_tier: SvTier::TIER_4
                });
            }
        };

        let context = TierContext {
            reference: &self.reference,
            copy_number: CopyNumber::from_values(evidence.copy_numbers.as_deref())
        };

        let units = parse_annotations(entries, self.reference.known_transcripts())?;
        let mut transcripts_by_event: BTreeMap<EventKey, BTreeSet<String>> = Default::default();
        for unit in units.iter() {
            let (rule_name, assignment) = assign_tier(unit, &context)?;
            trace!("{rule_name} => {} {}: {}", assignment.tier, assignment.detail, unit.raw());
            let key = EventKey {
                sv_type: unit.sv_type().to_string(),
                effects: unit.effects().clone(),
                genes: assignment.genes,
                detail: assignment.detail,
                tier: assignment.tier
            };
            let transcripts = transcripts_by_event.entry(key).or_default();
            if let Some(label) = unit.transcript_label() {
                transcripts.insert(label);
            }
        }

        let mut annotations: BTreeSet<SimpleAnnotation> = transcripts_by_event.into_iter()
            .map(|(key, transcripts)| SimpleAnnotation {
                sv_type: key.sv_type,
                effects: join_set(&key.effects),
                genes: join_set(&key.genes),
                transcripts: join_set(&transcripts),
                detail: key.detail,
                tier: key.tier
            })
            .collect();

        let lof_genes = parse_lof_genes(&evidence.lof);
        if let Some(assignment) = assign_lof_tier(&lof_genes, &context) {
            annotations.insert(SimpleAnnotation {
                sv_type: evidence.sv_type.clone(),
                effects: LOF_EFFECT.to_string(),
                genes: join_set(&assignment.genes),
                transcripts: String::new(),
                detail: assignment.detail,
                tier: assignment.tier
            });
        }

        if annotations.is_empty() {
            annotations.insert(SimpleAnnotation::sentinel(&evidence.sv_type, NO_PRIORITY_EFFECT));
        }

        let top_tier = annotations.iter()
            .map(|a| a.tier)
            .min()
            .unwrap_or(SvTier::TIER_4);
        Ok(SvPrioritization {
            annotations: annotations.into_iter().collect(),
            top_tier
        })
    }
}

/// Running tallies over all prioritized records
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrioritizationStats {
    /// Total records seen
    pub num_records: usize,
    /// Records per top tier, index 0 is tier 1
    pub tier_counts: [usize; 4]
}

impl PrioritizationStats {
    pub fn add(&mut self, prioritization: &SvPrioritization) {
        self.num_records += 1;
        self.tier_counts[(prioritization.top_tier().value() - 1) as usize] += 1;
    }

    /// Reports the tallies at info level
    pub fn log_summary(&self) {
        info!("Prioritized {} records:", self.num_records);
        for (i, count) in self.tier_counts.iter().enumerate() {
            info!("\tTier {}: {count}", i + 1);
        }
    }
}
