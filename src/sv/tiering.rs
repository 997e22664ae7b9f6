
use itertools::Itertools;
use std::collections::BTreeSet;

use crate::reference::SvReferenceData;
use crate::sv::annotation::SvAnnotationUnit;
use crate::sv::errors::SvAnnotationError;

/// A priority tier, 1 is the highest priority and 4 is no interest
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SvTier(u8);

impl SvTier {
    pub const TIER_1: SvTier = SvTier(1);
    pub const TIER_2: SvTier = SvTier(2);
    pub const TIER_3: SvTier = SvTier(3);
    pub const TIER_4: SvTier = SvTier(4);

    pub fn value(self) -> u8 {
        self.0
    }

    /// One step less urgent, saturating at tier 4
    pub fn worsened(self) -> SvTier {
        SvTier((self.0 + 1).min(4))
    }

    /// One step more urgent, saturating at tier 1
    pub fn improved(self) -> SvTier {
        SvTier(self.0.saturating_sub(1).max(1))
    }
}

impl std::fmt::Display for SvTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Copy number evidence for a record, from INFO/PURPLE_CN
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CopyNumber {
    /// No copy number annotation
    #[default]
    Unknown,
    /// Annotated, but no value indicates a real deletion
    NonZero,
    /// At least one value is at or below the zero-copy threshold
    ZeroCopy
}

/// Copy numbers at or below this are considered a real deletion
pub const ZERO_COPY_THRESHOLD: f64 = 0.5;

impl CopyNumber {
    /// Classifies the copy number values of a record
    /// # Arguments
    /// * `values` - the PURPLE_CN values, None if the field is absent
    pub fn from_values(values: Option<&[f64]>) -> CopyNumber {
        match values {
            None => CopyNumber::Unknown,
            Some(v) if v.iter().any(|&cn| cn <= ZERO_COPY_THRESHOLD) => CopyNumber::ZeroCopy,
            Some(_) => CopyNumber::NonZero
        }
    }

    /// Adjusts a tier and detail label: zero copy improves by one and suffixes "_cn0", non-zero worsens by one
    pub fn adjust(self, assignment: TierAssignment) -> TierAssignment {
        match self {
            CopyNumber::Unknown => assignment,
            CopyNumber::NonZero => TierAssignment {
                tier: assignment.tier.worsened(),
                ..assignment
            },
            CopyNumber::ZeroCopy => TierAssignment {
                tier: assignment.tier.improved(),
                detail: format!("{}_cn0", assignment.detail),
                ..assignment
            }
        }
    }
}

/// Everything the tier rules can look at beyond the annotation unit itself
pub struct TierContext<'a> {
    /// The loaded gene, fusion, and transcript lists
    pub reference: &'a SvReferenceData,
    /// Copy number evidence for the record
    pub copy_number: CopyNumber
}

/// The result of a tier rule
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierAssignment {
    pub tier: SvTier,
    /// e.g. "key_gene", "known_pair"
    pub detail: String,
    /// The genes reported, may be narrowed from the unit's genes
    pub genes: BTreeSet<String>
}

impl TierAssignment {
    fn new(tier: SvTier, detail: &str, genes: &BTreeSet<String>) -> TierAssignment {
        TierAssignment {
            tier,
            detail: detail.to_string(),
            genes: genes.clone()
        }
    }
}

/// A tier rule; the first rule that applies to a unit decides its tier
pub struct TierRule {
    /// Short name for logging
    pub name: &'static str,
    /// Returns true if this rule decides the tier of the unit
    pub applies: fn(&SvAnnotationUnit, &TierContext) -> bool,
    /// Decides the tier of the unit
    pub assign: fn(&SvAnnotationUnit, &TierContext) -> Result<TierAssignment, SvAnnotationError>
}

/// The tier rules in priority order, the last one always applies
pub const TIER_RULES: [TierRule; 5] = [
    TierRule { name: "exon_loss", applies: is_exon_loss, assign: assign_exon_loss },
    TierRule { name: "gene_fusion", applies: is_gene_fusion, assign: assign_gene_fusion },
    TierRule { name: "flanking", applies: is_flanking, assign: assign_flanking },
    TierRule { name: "high_impact", applies: is_high_impact, assign: assign_high_impact },
    TierRule { name: "other", applies: always, assign: assign_other },
];

const EXON_LOSS_EFFECTS: [&str; 1] = ["exon_loss_variant"];
const GENE_FUSION_EFFECTS: [&str; 1] = ["gene_fusion"];
const FLANKING_EFFECTS: [&str; 2] = ["downstream_gene_variant", "upstream_gene_variant"];
const HIGH_IMPACT: &str = "HIGH";

/// Returns the partner-list detail for exactly two genes: known pair first, then promiscuous
fn known_fusion_detail(genes: &BTreeSet<String>, reference: &SvReferenceData) -> Option<&'static str> {
    if genes.len() != 2 {
        return None;
    }
    let mut iter = genes.iter();
    let (g1, g2) = match (iter.next(), iter.next()) {
        (Some(g1), Some(g2)) => (g1, g2),
        _ => return None
    };
    let fusions = reference.fusions();
    if fusions.is_known_pair(g1, g2) {
        Some("known_pair")
    } else if fusions.is_promiscuous(g1) || fusions.is_promiscuous(g2) {
        Some("known_promiscuous")
    } else {
        None
    }
}

fn is_exon_loss(unit: &SvAnnotationUnit, _context: &TierContext) -> bool {
    unit.has_any_effect(&EXON_LOSS_EFFECTS)
}

fn assign_exon_loss(unit: &SvAnnotationUnit, context: &TierContext) -> Result<TierAssignment, SvAnnotationError> {
    if unit.genes().len() != 1 {
        return Err(SvAnnotationError::ExonLossGeneCount {
            count: unit.genes().len(),
            entry: unit.raw().to_string()
        });
    }
    if context.reference.priority_genes().contains_any(unit.genes()) {
        Ok(TierAssignment::new(SvTier::TIER_2, "key_gene", unit.genes()))
    } else {
        Ok(TierAssignment::new(SvTier::TIER_3, "unprioritized", unit.genes()))
    }
}

fn is_gene_fusion(unit: &SvAnnotationUnit, _context: &TierContext) -> bool {
    unit.has_any_effect(&GENE_FUSION_EFFECTS)
}

fn assign_gene_fusion(unit: &SvAnnotationUnit, context: &TierContext) -> Result<TierAssignment, SvAnnotationError> {
    let genes = unit.genes();
    if let Some(detail) = known_fusion_detail(genes, context.reference) {
        Ok(TierAssignment::new(SvTier::TIER_1, detail, genes))
    } else if context.reference.priority_genes().contains_any(genes) {
        Ok(TierAssignment::new(SvTier::TIER_2, "key_gene", genes))
    } else {
        Ok(TierAssignment::new(SvTier::TIER_4, "unknown", genes))
    }
}

fn is_flanking(unit: &SvAnnotationUnit, _context: &TierContext) -> bool {
    unit.has_any_effect(&FLANKING_EFFECTS)
}

fn assign_flanking(unit: &SvAnnotationUnit, context: &TierContext) -> Result<TierAssignment, SvAnnotationError> {
    // a gene can fall under the control of its neighbour's promoter
    // gene pairs are only judged against the fusion lists
    let genes = unit.genes();
    if let Some(detail) = known_fusion_detail(genes, context.reference) {
        Ok(TierAssignment::new(SvTier::TIER_2, detail, genes))
    } else if genes.len() != 2 && context.reference.priority_genes().contains_any(genes) {
        Ok(TierAssignment::new(SvTier::TIER_3, "near_key_gene", genes))
    } else {
        Ok(TierAssignment::new(SvTier::TIER_4, "unprioritized", genes))
    }
}

fn is_high_impact(unit: &SvAnnotationUnit, context: &TierContext) -> bool {
    unit.impact() == HIGH_IMPACT &&
        (unit.is_chromosome() || context.reference.tumor_suppressors().contains_any(unit.genes()))
}

fn assign_high_impact(unit: &SvAnnotationUnit, context: &TierContext) -> Result<TierAssignment, SvAnnotationError> {
    let genes = unit.genes();
    let assignment = if context.reference.tumor_suppressors().contains_any(genes) {
        tsgene_assignment(genes, context.reference)
    } else {
        // only reachable for chromosome features
        let chrom_label = genes.iter().join("_");
        TierAssignment::new(SvTier::TIER_2, &format!("chrom_{chrom_label}"), genes)
    };
    Ok(context.copy_number.adjust(assignment))
}

/// Tier for genes that include a tumor suppressor, before any copy number adjustment
fn tsgene_assignment(genes: &BTreeSet<String>, reference: &SvReferenceData) -> TierAssignment {
    if reference.priority_genes().contains_any(genes) {
        TierAssignment::new(SvTier::TIER_2, "key_tsgene", genes)
    } else {
        TierAssignment::new(SvTier::TIER_3, "tsgene", genes)
    }
}

fn always(_unit: &SvAnnotationUnit, _context: &TierContext) -> bool {
    true
}

fn assign_other(unit: &SvAnnotationUnit, context: &TierContext) -> Result<TierAssignment, SvAnnotationError> {
    let priority_genes = context.reference.priority_genes();
    let key_genes: BTreeSet<String> = unit.genes().iter()
        .filter(|g| priority_genes.contains(g))
        .cloned()
        .collect();
    if key_genes.is_empty() {
        Ok(TierAssignment::new(SvTier::TIER_4, "unprioritized", unit.genes()))
    } else {
        Ok(TierAssignment::new(SvTier::TIER_3, "key_gene", &key_genes))
    }
}

/// Finds the first applicable rule and returns its assignment along with the rule name
/// # Arguments
/// * `unit` - the parsed annotation
/// * `context` - reference data and copy number for the record
/// # Errors
/// * if the deciding rule finds a contract violation, e.g. an exon loss with multiple genes
pub fn assign_tier(unit: &SvAnnotationUnit, context: &TierContext) -> Result<(&'static str, TierAssignment), SvAnnotationError> {
    for rule in TIER_RULES.iter() {
        if (rule.applies)(unit, context) {
            return Ok((rule.name, (rule.assign)(unit, context)?));
        }
    }
    // the last rule always applies
    Ok(("other", assign_other(unit, context)?))
}

/// Classifies the genes from a LOF annotation; only genes that are tumor suppressors produce an event.
/// Genes are narrowed to tumor suppressors, then to priority genes if any are present.
/// # Arguments
/// * `lof_genes` - gene names from the LOF field
/// * `context` - reference data and copy number for the record
pub fn assign_lof_tier(lof_genes: &BTreeSet<String>, context: &TierContext) -> Option<TierAssignment> {
    let reference = context.reference;
    let tsgenes: BTreeSet<String> = lof_genes.iter()
        .filter(|g| reference.tumor_suppressors().contains(g))
        .cloned()
        .collect();
    if tsgenes.is_empty() {
        return None;
    }

    let key_tsgenes: BTreeSet<String> = tsgenes.iter()
        .filter(|g| reference.priority_genes().contains(g))
        .cloned()
        .collect();
    let assignment = if key_tsgenes.is_empty() {
        tsgene_assignment(&tsgenes, reference)
    } else {
        tsgene_assignment(&key_tsgenes, reference)
    };
    Some(context.copy_number.adjust(assignment))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rustc_hash::FxHashSet as HashSet;

    use crate::reference::fusions::FusionKnowledgeBase;
    use crate::reference::gene_list::GeneSet;
    use crate::sv::annotation::parse_annotation_entry;

    fn reference() -> SvReferenceData {
        let priority_genes: GeneSet = ["ALK", "EML4", "TP53", "PTEN", "KMT2A", "ERG"].iter().map(|s| s.to_string()).collect();
        let tumor_suppressors: GeneSet = ["TP53", "PTEN", "NF1"].iter().map(|s| s.to_string()).collect();
        let known_pairs: HashSet<(String, String)> = [("EML4", "ALK"), ("TMPRSS2", "ERG")].iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        let promiscuous: HashSet<String> = ["KMT2A"].iter().map(|s| s.to_string()).collect();
        let known_transcripts: HashSet<String> = ["ENST00000269305", "ENST00000371953", "ENST00000389048"].iter()
            .map(|s| s.to_string())
            .collect();
        SvReferenceData::new(priority_genes, tumor_suppressors, FusionKnowledgeBase::new(known_pairs, promiscuous), known_transcripts)
    }

    fn unit(entry: &str) -> SvAnnotationUnit {
        parse_annotation_entry(entry, reference().known_transcripts()).unwrap().unwrap()
    }

    fn tier(entry: &str, copy_number: CopyNumber) -> (&'static str, u8, String) {
        let reference = reference();
        let context = TierContext { reference: &reference, copy_number };
        let (name, assignment) = assign_tier(&unit(entry), &context).unwrap();
        (name, assignment.tier.value(), assignment.detail)
    }

    #[test]
    fn test_sv_tier() {
        assert_eq!(SvTier::TIER_4.worsened(), SvTier::TIER_4);
        assert_eq!(SvTier::TIER_1.improved(), SvTier::TIER_1);
        assert_eq!(SvTier::TIER_2.improved(), SvTier::TIER_1);
        assert_eq!(SvTier::TIER_2.worsened(), SvTier::TIER_3);
        assert!(SvTier::TIER_1 < SvTier::TIER_4);
        assert_eq!(SvTier::TIER_3.to_string(), "3");
    }

    #[test]
    fn test_copy_number() {
        assert_eq!(CopyNumber::from_values(None), CopyNumber::Unknown);
        assert_eq!(CopyNumber::from_values(Some(&[2.1, 1.9])), CopyNumber::NonZero);
        assert_eq!(CopyNumber::from_values(Some(&[2.1, 0.5])), CopyNumber::ZeroCopy);
        assert_eq!(CopyNumber::from_values(Some(&[-0.1])), CopyNumber::ZeroCopy);
    }

    #[test]
    fn test_exon_loss() {
        let entry = "DEL|exon_loss_variant|HIGH|TP53|ENSG00000141510|transcript|ENST00000269305.8|protein_coding|5/11||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("exon_loss", 2, "key_gene".to_string()));
        let entry = "DEL|exon_loss_variant&intron_variant|HIGH|NF2|ENSG00000186575|gene_variant|ENSG00000186575|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("exon_loss", 3, "unprioritized".to_string()));
    }

    #[test]
    fn test_exon_loss_gene_count() {
        let reference = reference();
        let context = TierContext { reference: &reference, copy_number: CopyNumber::Unknown };
        let entry = "DEL|exon_loss_variant|HIGH|TP53&PTEN|ENSG00000141510|gene_variant|ENSG00000141510|||||||";
        let result = assign_tier(&unit(entry), &context);
        assert_eq!(result, Err(SvAnnotationError::ExonLossGeneCount { count: 2, entry: entry.to_string() }));
    }

    #[test]
    fn test_gene_fusion() {
        let entry = "INV|gene_fusion|HIGH|EML4&ALK|ENSG00000143924&ENSG00000171094|gene_variant|ENSG00000143924|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 1, "known_pair".to_string()));
        // order does not matter
        let entry = "INV|gene_fusion|HIGH|ALK&EML4|ENSG00000171094&ENSG00000143924|gene_variant|ENSG00000171094|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 1, "known_pair".to_string()));
        let entry = "BND|gene_fusion|HIGH|ERG&TMPRSS2|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown).1, 1);

        // promiscuous partner
        let entry = "BND|gene_fusion|HIGH|KMT2A&FOO|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 1, "known_promiscuous".to_string()));

        // one key gene
        let entry = "BND|gene_fusion|HIGH|ALK&FOO|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 2, "key_gene".to_string()));
        let entry = "BND|gene_fusion|HIGH|ALK|ENSG1|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 2, "key_gene".to_string()));

        let entry = "BND|gene_fusion|HIGH|FOO&BAR|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("gene_fusion", 4, "unknown".to_string()));
    }

    #[test]
    fn test_flanking() {
        let entry = "DEL|upstream_gene_variant|MODIFIER|EML4&ALK|ENSG1&ENSG2|transcript|ENST00000389048|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 2, "known_pair".to_string()));
        let entry = "DEL|downstream_gene_variant|MODIFIER|KMT2A&FOO|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 2, "known_promiscuous".to_string()));
        // a priority gene paired with an unlisted partner is not near a key gene
        let entry = "DEL|downstream_gene_variant|MODIFIER|PTEN&FOO|ENSG1&ENSG2|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 4, "unprioritized".to_string()));
        let entry = "DEL|upstream_gene_variant|MODIFIER|PTEN|ENSG1|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 3, "near_key_gene".to_string()));
        let entry = "DEL|upstream_gene_variant|MODIFIER|PTEN&FOO&BAR|ENSG1&ENSG2&ENSG3|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 3, "near_key_gene".to_string()));
        let entry = "DEL|downstream_gene_variant|MODIFIER|FOO|ENSG1|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("flanking", 4, "unprioritized".to_string()));
    }

    #[test]
    fn test_high_impact_tsgene() {
        let entry = "DEL|frameshift_variant|HIGH|PTEN|ENSG00000171862|transcript|ENST00000371953.8|protein_coding|5/9||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("high_impact", 2, "key_tsgene".to_string()));
        assert_eq!(tier(entry, CopyNumber::NonZero), ("high_impact", 3, "key_tsgene".to_string()));
        assert_eq!(tier(entry, CopyNumber::ZeroCopy), ("high_impact", 1, "key_tsgene_cn0".to_string()));

        let entry = "DEL|frameshift_variant|HIGH|NF1|ENSG00000196712|gene_variant|ENSG00000196712|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("high_impact", 3, "tsgene".to_string()));
        assert_eq!(tier(entry, CopyNumber::NonZero), ("high_impact", 4, "tsgene".to_string()));
        assert_eq!(tier(entry, CopyNumber::ZeroCopy), ("high_impact", 2, "tsgene_cn0".to_string()));
    }

    #[test]
    fn test_high_impact_chromosome() {
        let entry = "DEL|chromosome_number_variation|HIGH|||chromosome|22|||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("high_impact", 2, "chrom_22".to_string()));
        assert_eq!(tier(entry, CopyNumber::ZeroCopy), ("high_impact", 1, "chrom_22_cn0".to_string()));

        // a tumor suppressor overrides the chromosome label
        let entry = "DEL|chromosome_number_variation|HIGH|NF1&FOO||chromosome|17|||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("high_impact", 3, "tsgene".to_string()));

        // not high impact
        let entry = "DEL|chromosome_number_variation|MODERATE|||chromosome|22|||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("other", 4, "unprioritized".to_string()));
    }

    #[test]
    fn test_other() {
        let reference = reference();
        let context = TierContext { reference: &reference, copy_number: CopyNumber::ZeroCopy };
        let entry = "DEL|intron_variant|MODIFIER|ALK&FOO|ENSG1&ENSG2|transcript|ENST00000389048.1|||||||";
        let (name, assignment) = assign_tier(&unit(entry), &context).unwrap();
        assert_eq!(name, "other");
        // copy number does not apply here
        assert_eq!(assignment.tier, SvTier::TIER_3);
        assert_eq!(assignment.detail, "key_gene");
        assert_eq!(assignment.genes, BTreeSet::from(["ALK".to_string()]));

        // HIGH impact, but not a tumor suppressor
        let entry = "DEL|frameshift_variant|HIGH|FOO|ENSG1|gene_variant|ENSG1|||||||";
        assert_eq!(tier(entry, CopyNumber::Unknown), ("other", 4, "unprioritized".to_string()));
    }

    #[test]
    fn test_lof() {
        let reference = reference();
        let genes = |v: &[&str]| -> BTreeSet<String> { v.iter().map(|s| s.to_string()).collect() };
        let context = TierContext { reference: &reference, copy_number: CopyNumber::Unknown };

        assert_eq!(assign_lof_tier(&genes(&["FOO", "BAR"]), &context), None);

        let assignment = assign_lof_tier(&genes(&["FOO", "NF1", "PTEN", "TP53"]), &context).unwrap();
        assert_eq!(assignment.tier, SvTier::TIER_2);
        assert_eq!(assignment.detail, "key_tsgene");
        assert_eq!(assignment.genes, genes(&["PTEN", "TP53"]));

        let context = TierContext { reference: &reference, copy_number: CopyNumber::ZeroCopy };
        let assignment = assign_lof_tier(&genes(&["FOO", "NF1"]), &context).unwrap();
        assert_eq!(assignment.tier, SvTier::TIER_2);
        assert_eq!(assignment.detail, "tsgene_cn0");
        assert_eq!(assignment.genes, genes(&["NF1"]));
    }
}
