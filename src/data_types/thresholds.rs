
use serde::{Deserialize, Serialize};
use simple_error::bail;

/// Default thresholds for the small variant filters and rescue rules
pub const MIN_AF: f64 = 0.10;
pub const MIN_AD: i32 = 4;
pub const MIN_AD_DIFFICULT_REGIONS: i32 = 6;
pub const PON_HIT_THRESHOLD: i32 = 5;
pub const MAX_GNOMAD_AF: f64 = 0.01;
pub const MIN_COSMIC_COUNT_RESCUE: i32 = 10;
pub const MIN_TCGA_PANCANCER_COUNT_RESCUE: i32 = 5;
pub const MIN_ICGC_PCAWG_COUNT_RESCUE: i32 = 5;

/// Default thresholds for variant selection ahead of clinical annotation
pub const MAX_SOMATIC_VARIANTS: usize = 500_000;
pub const MAX_SOMATIC_VARIANTS_GNOMAD_FILTER: f64 = 0.01;
pub const CANCER_GENE_PADDING: u64 = 1000;

/// All of the thresholds used by the small variant filter and rescue rules.
/// Can be loaded from JSON, any value that is not specified falls back to the default.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Variants with a tumor AF below this are filtered
    pub min_af: f64,
    /// Variants with an alt depth below this are filtered
    pub min_ad: i32,
    /// Alt depth threshold applied in difficult or non-GIAB regions
    pub min_ad_difficult: i32,
    /// Number of panel-of-normals hits that triggers a filter
    pub pon_hit_threshold: i32,
    /// Population AF at or above this is considered common
    pub max_gnomad_af: f64,
    /// COSMIC count at or above this triggers a clinical rescue
    pub min_cosmic_count_rescue: i32,
    /// TCGA pan-cancer count at or above this triggers a clinical rescue
    pub min_tcga_pancancer_count_rescue: i32,
    /// ICGC PCAWG count at or above this triggers a clinical rescue
    pub min_icgc_pcawg_count_rescue: i32,
    /// Case-insensitive substrings of the ClinVar significance that trigger a clinical rescue
    pub clinvar_clinsigs_rescue: Vec<String>,
    /// PCGR tiers that trigger a tier rescue
    pub pcgr_tiers_rescue: Vec<String>
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_af: MIN_AF,
            min_ad: MIN_AD,
            min_ad_difficult: MIN_AD_DIFFICULT_REGIONS,
            pon_hit_threshold: PON_HIT_THRESHOLD,
            max_gnomad_af: MAX_GNOMAD_AF,
            min_cosmic_count_rescue: MIN_COSMIC_COUNT_RESCUE,
            min_tcga_pancancer_count_rescue: MIN_TCGA_PANCANCER_COUNT_RESCUE,
            min_icgc_pcawg_count_rescue: MIN_ICGC_PCAWG_COUNT_RESCUE,
            clinvar_clinsigs_rescue: vec![
                "pathogenic".to_string(),
                "conflicting_interpretations_of_pathogenicity".to_string(),
                "uncertain".to_string()
            ],
            pcgr_tiers_rescue: vec![
                "TIER_1".to_string(),
                "TIER_2".to_string()
            ]
        }
    }
}

impl FilterThresholds {
    /// Checks that all the values are in a sensible range.
    /// # Errors
    /// * if an allele fraction is outside [0.0, 1.0]
    /// * if a count threshold is negative
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if !(0.0..=1.0).contains(&self.min_af) {
            bail!("min_af must be between 0.0 and 1.0");
        }
        if !(0.0..=1.0).contains(&self.max_gnomad_af) {
            bail!("max_gnomad_af must be between 0.0 and 1.0");
        }
        let counts = [
            ("min_ad", self.min_ad),
            ("min_ad_difficult", self.min_ad_difficult),
            ("pon_hit_threshold", self.pon_hit_threshold),
            ("min_cosmic_count_rescue", self.min_cosmic_count_rescue),
            ("min_tcga_pancancer_count_rescue", self.min_tcga_pancancer_count_rescue),
            ("min_icgc_pcawg_count_rescue", self.min_icgc_pcawg_count_rescue)
        ];
        for (label, value) in counts.iter() {
            if *value < 0 {
                bail!("{label} must be non-negative, got {value}");
            }
        }
        if self.clinvar_clinsigs_rescue.iter().any(|s| s.is_empty()) {
            bail!("clinvar_clinsigs_rescue cannot contain an empty string");
        }
        Ok(())
    }
}

/// Thresholds controlling the variant selection cascade
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SelectionThresholds {
    /// Maximum number of variants forwarded to clinical annotation
    pub max_variants: usize,
    /// Population AF at or above this is excluded by the population stage
    pub max_gnomad_af: f64,
    /// Padding applied to both sides of each cancer gene interval
    pub gene_padding: u64
}

impl Default for SelectionThresholds {
    fn default() -> Self {
        Self {
            max_variants: MAX_SOMATIC_VARIANTS,
            max_gnomad_af: MAX_SOMATIC_VARIANTS_GNOMAD_FILTER,
            gene_padding: CANCER_GENE_PADDING
        }
    }
}
