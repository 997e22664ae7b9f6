
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use rustc_hash::FxHashSet as HashSet;
use std::collections::BTreeSet;

use crate::sv::errors::SvAnnotationError;

/// Entries with fewer fields than this are skipped
pub const MIN_ANN_FIELDS: usize = 11;

lazy_static! {
    /// A versionless Ensembl transcript id
    static ref TRANSCRIPT_ID_REGEX: Regex = Regex::new(r"^ENST\d+$").unwrap();
}

/// Feature type of whole-chromosome annotations
const CHROMOSOME_FEATURE: &str = "chromosome";
/// Feature type of protein interaction annotations, always skipped
const INTERACTION_FEATURE: &str = "interaction";
/// Effect of sequence feature annotations, always skipped
const SEQUENCE_FEATURE_EFFECT: &str = "sequence_feature";

/// One decomposed ANN entry
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SvAnnotationUnit {
    /// SV type from the allele field, with any angle brackets removed
    sv_type: String,
    /// e.g. "transcript", "chromosome"
    feature_type: String,
    /// The set of effect terms
    effects: BTreeSet<String>,
    /// HIGH, MODERATE, LOW, MODIFIER
    impact: String,
    /// Gene symbols, two for fusions
    genes: BTreeSet<String>,
    /// Versionless transcript id, empty if there is none
    transcript_id: String,
    /// Exon or intron rank, e.g. "4/20"
    rank: String,
    /// The entry as it was in the record
    raw: String
}

impl SvAnnotationUnit {
    pub fn sv_type(&self) -> &str {
        &self.sv_type
    }

    pub fn feature_type(&self) -> &str {
        &self.feature_type
    }

    pub fn effects(&self) -> &BTreeSet<String> {
        &self.effects
    }

    pub fn impact(&self) -> &str {
        &self.impact
    }

    pub fn genes(&self) -> &BTreeSet<String> {
        &self.genes
    }

    pub fn transcript_id(&self) -> &str {
        &self.transcript_id
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_chromosome(&self) -> bool {
        self.feature_type == CHROMOSOME_FEATURE
    }

    /// Returns true if any of the effects are present
    pub fn has_any_effect(&self, effects: &[&str]) -> bool {
        effects.iter().any(|&e| self.effects.contains(e))
    }

    /// The transcript as written into the simplified annotation, e.g. "ENST00000348332_exon_4/20".
    /// Returns None if there is no transcript.
    pub fn transcript_label(&self) -> Option<String> {
        if self.transcript_id.is_empty() {
            None
        } else if self.rank.is_empty() {
            Some(self.transcript_id.clone())
        } else {
            Some(format!("{}_exon_{}", self.transcript_id, self.rank))
        }
    }
}

/// Splits a multi-value field on '&', dropping empty values
fn split_multi(value: &str) -> BTreeSet<String> {
    value.split('&')
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .collect()
}

/// Parses a single ANN entry.
/// Returns None for entries that are skipped: too few fields, interactions, sequence features,
/// and Ensembl transcripts that are not in the known transcript set.
/// # Arguments
/// * `entry` - one comma-separated ANN value
/// * `known_transcripts` - every principal and alternative transcript id
/// # Errors
/// * if the entry has more than one distinct transcript id
/// * if an Ensembl transcript id is malformed
pub fn parse_annotation_entry(entry: &str, known_transcripts: &HashSet<String>) -> Result<Option<SvAnnotationUnit>, SvAnnotationError> {
    let fields: Vec<&str> = entry.split('|').collect();
    if fields.len() < MIN_ANN_FIELDS {
        trace!("Skipping ANN entry with {} fields: {entry}", fields.len());
        return Ok(None);
    }

    // Allele|Annotation|Annotation_Impact|Gene_Name|Gene_ID|Feature_Type|Feature_ID|Transcript_BioType|Rank|...
    let feature_type = fields[5];
    let effect = fields[1];
    if feature_type == INTERACTION_FEATURE || effect == SEQUENCE_FEATURE_EFFECT {
        return Ok(None);
    }

    let sv_type = fields[0].replace(['<', '>'], "");
    let effects = split_multi(effect);
    let mut genes = split_multi(fields[3]);

    let transcript_ids: BTreeSet<String> = fields[6].split('&')
        .filter(|f| !f.is_empty())
        .map(|f| f.split('.').next().unwrap_or_default().to_string())
        .collect();
    if transcript_ids.len() > 1 {
        return Err(SvAnnotationError::MultipleTranscriptIds {
            count: transcript_ids.len(),
            entry: entry.to_string()
        });
    }

    let mut transcript_id = transcript_ids.iter().next().cloned().unwrap_or_default();
    if transcript_id.starts_with("ENST") {
        if !TRANSCRIPT_ID_REGEX.is_match(&transcript_id) {
            return Err(SvAnnotationError::MalformedTranscriptId {
                transcript_id,
                entry: entry.to_string()
            });
        }
        if !known_transcripts.contains(&transcript_id) {
            trace!("Skipping ANN entry with unknown transcript {transcript_id}: {entry}");
            return Ok(None);
        }
    } else if !transcript_id.is_empty() && feature_type == CHROMOSOME_FEATURE {
        // the feature id of a chromosome is the chromosome name
        if genes.is_empty() {
            genes = transcript_ids;
        }
        transcript_id = String::new();
    }

    Ok(Some(SvAnnotationUnit {
        sv_type,
        feature_type: feature_type.to_string(),
        effects,
        impact: fields[2].to_string(),
        genes,
        transcript_id,
        rank: fields[8].to_string(),
        raw: entry.to_string()
    }))
}

/// Parses every ANN entry of a record, dropping the skipped ones
/// # Arguments
/// * `entries` - the ANN values
/// * `known_transcripts` - every principal and alternative transcript id
/// # Errors
/// * if any entry violates the annotation contract, see `parse_annotation_entry`
pub fn parse_annotations<S: AsRef<str>>(entries: &[S], known_transcripts: &HashSet<String>) -> Result<Vec<SvAnnotationUnit>, SvAnnotationError> {
    let mut units = Vec::with_capacity(entries.len());
    for entry in entries.iter() {
        if let Some(unit) = parse_annotation_entry(entry.as_ref(), known_transcripts)? {
            units.push(unit);
        }
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> HashSet<String> {
        ["ENST00000348332", "ENST00000389048", "ENST00000318522"].iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_transcript_entry() {
        let entry = "<DEL>|splice_acceptor_variant&splice_region_variant&intron_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENST00000348332.13|protein_coding|4/20|c.257-52_257-2del||||||INFO_REALIGN_3_PRIME";
        let unit = parse_annotation_entry(entry, &known()).unwrap().unwrap();
        assert_eq!(unit.sv_type(), "DEL");
        assert_eq!(unit.feature_type(), "transcript");
        assert_eq!(unit.effects(), &set(&["splice_acceptor_variant", "splice_region_variant", "intron_variant"]));
        assert_eq!(unit.impact(), "HIGH");
        assert_eq!(unit.genes(), &set(&["NCOA1"]));
        assert_eq!(unit.transcript_id(), "ENST00000348332");
        assert_eq!(unit.transcript_label().unwrap(), "ENST00000348332_exon_4/20");
        assert_eq!(unit.raw(), entry);
        assert!(!unit.is_chromosome());
        assert!(unit.has_any_effect(&["intron_variant", "gene_fusion"]));
    }

    #[test]
    fn test_parse_fusion_entry() {
        let entry = "<INV>|gene_fusion|HIGH|EML4&ALK|ENSG00000143924&ENSG00000171094|gene_variant|ENSG00000143924|||||||||";
        let unit = parse_annotation_entry(entry, &known()).unwrap().unwrap();
        assert_eq!(unit.sv_type(), "INV");
        assert_eq!(unit.genes(), &set(&["ALK", "EML4"]));
        // gene ids are kept without a membership check
        assert_eq!(unit.transcript_id(), "ENSG00000143924");
        assert_eq!(unit.transcript_label().unwrap(), "ENSG00000143924");
    }

    #[test]
    fn test_skipped_entries() {
        let known = known();
        // too few fields
        assert_eq!(parse_annotation_entry("DEL|exon_loss_variant|HIGH", &known).unwrap(), None);
        // interaction
        let entry = "DEL|protein_protein_contact|HIGH|A|B|interaction|3UVN:C_107-D_1494:ENST00000358625-ENST00000262519|||||";
        assert_eq!(parse_annotation_entry(entry, &known).unwrap(), None);
        // sequence feature
        let entry = "DEL|sequence_feature|LOW|NCOA1|ENSG00000084676|transcript|ENST00000348332.13|||||";
        assert_eq!(parse_annotation_entry(entry, &known).unwrap(), None);
        // unknown transcript
        let entry = "DEL|exon_loss_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENST00000999999.1|||||";
        assert_eq!(parse_annotation_entry(entry, &known).unwrap(), None);
    }

    #[test]
    fn test_chromosome_entry() {
        let entry = "<DEL>|chromosome_number_variation|HIGH|||chromosome|22|||||";
        let unit = parse_annotation_entry(entry, &known()).unwrap().unwrap();
        assert!(unit.is_chromosome());
        assert_eq!(unit.genes(), &set(&["22"]));
        assert_eq!(unit.transcript_id(), "");
        assert_eq!(unit.transcript_label(), None);

        // genes are kept if present
        let entry = "DEL|chromosome_number_variation|HIGH|PTEN&TP53||chromosome|10|||||";
        let unit = parse_annotation_entry(entry, &known()).unwrap().unwrap();
        assert_eq!(unit.genes(), &set(&["PTEN", "TP53"]));
        assert_eq!(unit.transcript_id(), "");
    }

    #[test]
    fn test_fatal_entries() {
        let entry = "DEL|exon_loss_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENST00000348332.13&ENST00000389048.1|||||";
        assert_eq!(
            parse_annotation_entry(entry, &known()),
            Err(SvAnnotationError::MultipleTranscriptIds { count: 2, entry: entry.to_string() })
        );

        // versions collapse to the same id, so this one is fine
        let entry = "DEL|exon_loss_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENST00000348332.13&ENST00000348332.12|||||";
        assert!(parse_annotation_entry(entry, &known()).unwrap().is_some());

        let entry = "DEL|exon_loss_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENSTX0348332|||||";
        assert_eq!(
            parse_annotation_entry(entry, &known()),
            Err(SvAnnotationError::MalformedTranscriptId { transcript_id: "ENSTX0348332".to_string(), entry: entry.to_string() })
        );
    }

    #[test]
    fn test_parse_annotations() {
        let entries = [
            "DEL|exon_loss_variant|HIGH|NCOA1|ENSG00000084676|transcript|ENST00000348332.13|||||",
            "DEL|short",
            "DEL|intron_variant|MODIFIER|ALK|ENSG00000171094|transcript|ENST00000389048.1|||||",
        ];
        let units = parse_annotations(&entries, &known()).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].genes(), &set(&["ALK"]));
    }
}
