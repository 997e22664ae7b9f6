
use crate::data_types::thresholds::FilterThresholds;
use crate::data_types::vcf_symbols::VcfInfo;
use crate::smlv::evidence::ClinicalEvidence;

/// A rescue rule; if the predicate holds on a filtered record, the filters are cleared and the flag is set
pub struct RescueRule {
    /// The INFO flag marking this rescue
    pub flag: VcfInfo,
    /// Returns true if the clinical evidence justifies clearing the filters
    pub predicate: fn(&ClinicalEvidence, &FilterThresholds) -> bool
}

/// All rescue rules; every one that holds contributes its flag
pub const RESCUE_RULES: [RescueRule; 3] = [
    RescueRule { flag: VcfInfo::PcgrTierRescue, predicate: pcgr_tier_rescue },
    RescueRule { flag: VcfInfo::SageHotspotRescue, predicate: sage_hotspot_rescue },
    RescueRule { flag: VcfInfo::ClinicalPotentialRescue, predicate: clinical_potential_rescue },
];

fn pcgr_tier_rescue(clinical: &ClinicalEvidence, thresholds: &FilterThresholds) -> bool {
    match clinical.pcgr_tier.as_deref() {
        Some(tier) => thresholds.pcgr_tiers_rescue.iter().any(|t| t == tier),
        None => false
    }
}

fn sage_hotspot_rescue(clinical: &ClinicalEvidence, _thresholds: &FilterThresholds) -> bool {
    clinical.sage_hotspot
}

fn clinical_potential_rescue(clinical: &ClinicalEvidence, thresholds: &FilterThresholds) -> bool {
    clinical.hotspot ||
        clinical.pcgr_mutation_hotspot ||
        clinical.cosmic_count >= thresholds.min_cosmic_count_rescue ||
        clinical.tcga_pancancer_count >= thresholds.min_tcga_pancancer_count_rescue ||
        clinical.icgc_pcawg_count >= thresholds.min_icgc_pcawg_count_rescue ||
        clinvar_rescue(&clinical.clinvar_clnsig, &thresholds.clinvar_clinsigs_rescue)
}

/// Case-insensitive substring match of any significance value against the rescue terms
fn clinvar_rescue(clinsigs: &[String], rescue_terms: &[String]) -> bool {
    clinsigs.iter().any(|clinsig| {
        let clinsig = clinsig.to_lowercase();
        rescue_terms.iter().any(|term| clinsig.contains(&term.to_lowercase()))
    })
}

/// Returns the rescue flags whose rules hold, in rule order
/// # Arguments
/// * `clinical` - the clinical evidence for the record
/// * `thresholds` - the active thresholds
pub fn rescue_flags(clinical: &ClinicalEvidence, thresholds: &FilterThresholds) -> Vec<VcfInfo> {
    RESCUE_RULES.iter()
        .filter(|rule| (rule.predicate)(clinical, thresholds))
        .map(|rule| rule.flag)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(clinical: &ClinicalEvidence) -> Vec<VcfInfo> {
        rescue_flags(clinical, &FilterThresholds::default())
    }

    #[test]
    fn test_no_evidence() {
        assert!(flags(&ClinicalEvidence::default()).is_empty());
        let clinical = ClinicalEvidence {
            pcgr_tier: Some("TIER_3".to_string()),
            cosmic_count: 10 - 1,
            tcga_pancancer_count: 4,
            icgc_pcawg_count: 4,
            clinvar_clnsig: vec!["benign".to_string(), "likely_benign".to_string()],
            ..Default::default()
        };
        assert!(flags(&clinical).is_empty());
    }

    #[test]
    fn test_pcgr_tier() {
        for tier in ["TIER_1", "TIER_2"] {
            let clinical = ClinicalEvidence { pcgr_tier: Some(tier.to_string()), ..Default::default() };
            assert_eq!(flags(&clinical), vec![VcfInfo::PcgrTierRescue]);
        }
        let clinical = ClinicalEvidence { pcgr_tier: Some("NONCODING".to_string()), ..Default::default() };
        assert!(flags(&clinical).is_empty());
    }

    #[test]
    fn test_sage_hotspot() {
        let clinical = ClinicalEvidence { sage_hotspot: true, ..Default::default() };
        assert_eq!(flags(&clinical), vec![VcfInfo::SageHotspotRescue]);
    }

    #[test]
    fn test_clinical_potential() {
        let cases = [
            ClinicalEvidence { hotspot: true, ..Default::default() },
            ClinicalEvidence { pcgr_mutation_hotspot: true, ..Default::default() },
            ClinicalEvidence { cosmic_count: 11, ..Default::default() },
            ClinicalEvidence { cosmic_count: 10, ..Default::default() },
            ClinicalEvidence { tcga_pancancer_count: 6, ..Default::default() },
            ClinicalEvidence { icgc_pcawg_count: 6, ..Default::default() },
        ];
        for clinical in cases.iter() {
            assert_eq!(flags(clinical), vec![VcfInfo::ClinicalPotentialRescue]);
        }
    }

    #[test]
    fn test_clinvar_substrings() {
        for clinsig in ["conflicting_interpretations_of_pathogenicity", "likely_pathogenic", "Pathogenic", "uncertain_significance"] {
            let clinical = ClinicalEvidence { clinvar_clnsig: vec![clinsig.to_string()], ..Default::default() };
            assert_eq!(flags(&clinical), vec![VcfInfo::ClinicalPotentialRescue], "{clinsig}");
        }
    }

    #[test]
    fn test_multiple_flags() {
        let clinical = ClinicalEvidence {
            pcgr_tier: Some("TIER_1".to_string()),
            sage_hotspot: true,
            hotspot: true,
            ..Default::default()
        };
        assert_eq!(flags(&clinical), vec![
            VcfInfo::PcgrTierRescue,
            VcfInfo::SageHotspotRescue,
            VcfInfo::ClinicalPotentialRescue
        ]);
    }
}
