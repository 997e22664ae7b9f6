
use crate::data_types::record_annotation::FilterSet;
use crate::data_types::thresholds::FilterThresholds;
use crate::data_types::vcf_symbols::VcfFilter;
use crate::smlv::evidence::SmallVariantEvidence;

/// A single FILTER rule; the tag is applied whenever the predicate holds
pub struct FilterRule {
    /// The tag added by this rule
    pub filter: VcfFilter,
    /// Returns true if the tag applies to the evidence
    pub predicate: fn(&SmallVariantEvidence, &FilterThresholds) -> bool
}

/// All FILTER rules in the order they are applied.
/// Every rule is evaluated, the resulting FILTER set is the union of all that fire.
pub const FILTER_RULES: [FilterRule; 7] = [
    FilterRule { filter: VcfFilter::MinAf, predicate: below_min_af },
    FilterRule { filter: VcfFilter::MinAd, predicate: below_min_ad },
    FilterRule { filter: VcfFilter::MinAdDifficult, predicate: below_min_ad_difficult },
    FilterRule { filter: VcfFilter::MinAdNonGiab, predicate: below_min_ad_non_giab },
    FilterRule { filter: VcfFilter::Pon, predicate: pon_hits },
    FilterRule { filter: VcfFilter::Encode, predicate: encode_blocklist },
    FilterRule { filter: VcfFilter::GnomadCommon, predicate: population_common },
];

/// Filters that indicate a likely germline origin instead of a quality problem
const GERMLINE_FILTERS: [VcfFilter; 2] = [VcfFilter::Pon, VcfFilter::GnomadCommon];

fn below_min_af(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.allele_fraction < thresholds.min_af
}

fn below_min_ad(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.alt_depth < thresholds.min_ad
}

fn below_min_ad_difficult(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.alt_depth < thresholds.min_ad_difficult && evidence.difficult_region
}

fn below_min_ad_non_giab(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.alt_depth < thresholds.min_ad_difficult && !evidence.giab_high_confidence
}

fn pon_hits(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.pon_count >= thresholds.pon_hit_threshold
}

fn encode_blocklist(evidence: &SmallVariantEvidence, _thresholds: &FilterThresholds) -> bool {
    evidence.encode_blocklist
}

fn population_common(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds) -> bool {
    evidence.gnomad_af >= thresholds.max_gnomad_af
}

/// Adds every applicable FILTER tag to the set
/// # Arguments
/// * `evidence` - the record evidence
/// * `thresholds` - the active thresholds
/// * `filters` - the set to extend, usually seeded with the record's existing filters
pub fn assign_filters(evidence: &SmallVariantEvidence, thresholds: &FilterThresholds, filters: &mut FilterSet) {
    for rule in FILTER_RULES.iter() {
        if (rule.predicate)(evidence, thresholds) {
            filters.add(rule.filter);
        }
    }
}

/// Returns true if the record is filtered and every filter on it is a germline indicator (PON or gnomAD)
pub fn is_germline_leakage(filters: &FilterSet) -> bool {
    !filters.is_pass() && filters.ids().iter()
        .all(|id| GERMLINE_FILTERS.iter().any(|g| g.id() == *id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_ids(evidence: &SmallVariantEvidence) -> Vec<String> {
        let mut filters = FilterSet::default();
        assign_filters(evidence, &FilterThresholds::default(), &mut filters);
        filters.ids().iter().map(|s| s.to_string()).collect()
    }

    fn passing_evidence() -> SmallVariantEvidence {
        SmallVariantEvidence {
            giab_high_confidence: true,
            ..SmallVariantEvidence::new(6, 0.10)
        }
    }

    #[test]
    fn test_passing_record() {
        // AF and AD exactly at the thresholds pass
        assert_eq!(filter_ids(&passing_evidence()), vec!["PASS"]);
        assert_eq!(filter_ids(&SmallVariantEvidence { allele_fraction: 0.2, ..passing_evidence() }), vec!["PASS"]);
    }

    #[test]
    fn test_min_af() {
        let evidence = SmallVariantEvidence { allele_fraction: 0.099, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["min_AF"]);
    }

    #[test]
    fn test_min_ad_outside_difficult() {
        let evidence = SmallVariantEvidence { alt_depth: 3, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["min_AD"]);
    }

    #[test]
    fn test_min_ad_non_giab_only() {
        // AD 3, not difficult, but also not GIAB
        let evidence = SmallVariantEvidence::new(3, 0.1);
        assert_eq!(filter_ids(&evidence), vec!["min_AD", "min_AD_non_GIAB"]);
    }

    #[test]
    fn test_min_ad_difficult() {
        let evidence = SmallVariantEvidence { alt_depth: 5, difficult_region: true, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["min_AD_difficult_region"]);
    }

    #[test]
    fn test_min_ad_difficult_non_giab() {
        let evidence = SmallVariantEvidence { difficult_region: true, ..SmallVariantEvidence::new(3, 0.1) };
        let filters = filter_ids(&evidence);
        for expected in ["min_AD", "min_AD_difficult_region", "min_AD_non_GIAB"] {
            assert!(filters.contains(&expected.to_string()));
        }
    }

    #[test]
    fn test_pon_encode_gnomad() {
        let evidence = SmallVariantEvidence { pon_count: 5, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["PON"]);
        let evidence = SmallVariantEvidence { pon_count: 4, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["PASS"]);

        let evidence = SmallVariantEvidence { encode_blocklist: true, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["ENCODE"]);

        let evidence = SmallVariantEvidence { gnomad_af: 0.01, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["gnomAD_common"]);
        let evidence = SmallVariantEvidence { gnomad_af: 0.009, ..passing_evidence() };
        assert_eq!(filter_ids(&evidence), vec!["PASS"]);
    }

    #[test]
    fn test_germline_leakage() {
        let mut filters = FilterSet::default();
        assert!(!is_germline_leakage(&filters));

        filters.add(VcfFilter::Pon);
        assert!(is_germline_leakage(&filters));
        filters.add(VcfFilter::GnomadCommon);
        assert!(is_germline_leakage(&filters));

        // any quality reason means it is not leakage
        filters.add(VcfFilter::MinAf);
        assert!(!is_germline_leakage(&filters));

        let mut filters = FilterSet::default();
        filters.add(VcfFilter::Pon);
        filters.add(VcfFilter::Encode);
        assert!(!is_germline_leakage(&filters));
    }
}
