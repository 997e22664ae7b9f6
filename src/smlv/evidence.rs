
/// Clinical annotations transferred from PCGR and hotspot resources
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClinicalEvidence {
    /// PCGR tier label, e.g. "TIER_1"
    pub pcgr_tier: Option<String>,
    /// Called by SAGE at a provided hotspot location
    pub sage_hotspot: bool,
    /// Overlaps a curated hotspot
    pub hotspot: bool,
    /// PCGR reports a known mutation hotspot
    pub pcgr_mutation_hotspot: bool,
    /// ClinVar clinical significance values
    pub clinvar_clnsig: Vec<String>,
    /// Number of COSMIC observations
    pub cosmic_count: i32,
    /// TCGA pan-cancer observations
    pub tcga_pancancer_count: i32,
    /// ICGC PCAWG observations
    pub icgc_pcawg_count: i32
}

/// Everything the small variant classifier reads for one record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SmallVariantEvidence {
    /// FILTER values already on the record
    pub existing_filters: Vec<String>,
    /// Tumor alt allele depth
    pub alt_depth: i32,
    /// Tumor allele fraction
    pub allele_fraction: f64,
    /// True if any difficult-to-call stratification flag is set
    pub difficult_region: bool,
    /// True if within a GIAB high confidence region
    pub giab_high_confidence: bool,
    /// True if within the ENCODE blocklist
    pub encode_blocklist: bool,
    /// Panel of normals hit count, 0 when absent
    pub pon_count: i32,
    /// Population allele frequency, 0.0 when absent
    pub gnomad_af: f64,
    /// Clinical significance evidence for the rescue rules
    pub clinical: ClinicalEvidence
}

impl SmallVariantEvidence {
    /// Convenience constructor with all region/population evidence absent
    /// # Arguments
    /// * `alt_depth` - tumor alt allele depth
    /// * `allele_fraction` - tumor allele fraction
    pub fn new(alt_depth: i32, allele_fraction: f64) -> Self {
        Self {
            alt_depth,
            allele_fraction,
            ..Default::default()
        }
    }
}
