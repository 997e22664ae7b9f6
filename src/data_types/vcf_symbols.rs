
use strum::IntoEnumIterator;

use crate::data_types::thresholds::FilterThresholds;

/// The header section a symbol is declared in
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, strum_macros::Display)]
pub enum HeaderNamespace {
    #[strum(to_string = "FILTER")]
    Filter,
    #[strum(to_string = "INFO")]
    Info,
    #[strum(to_string = "FORMAT")]
    Format
}

/// A single header declaration, e.g. `##INFO=<ID=...,Number=...,Type=...,Description="...">`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HeaderDefinition {
    namespace: HeaderNamespace,
    id: &'static str,
    /// Number and Type only exist for INFO and FORMAT
    number: Option<&'static str>,
    value_type: Option<&'static str>,
    description: String
}

impl HeaderDefinition {
    pub fn namespace(&self) -> HeaderNamespace {
        self.namespace
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Renders the full header line, quotes in the description are escaped
    pub fn header_line(&self) -> String {
        let description = self.description.replace('"', "\\\"");
        match (self.number, self.value_type) {
            (Some(number), Some(value_type)) => format!(
                "##{}=<ID={},Number={number},Type={value_type},Description=\"{description}\">",
                self.namespace, self.id
            ),
            _ => format!("##{}=<ID={},Description=\"{description}\">", self.namespace, self.id)
        }
    }
}

/// All FILTER tags this tool can apply
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
    strum_macros::Display, strum_macros::EnumIter, strum_macros::IntoStaticStr)]
pub enum VcfFilter {
    #[strum(serialize = "SAGE_lowconf")]
    SageLowconf,
    #[strum(serialize = "max_variants_non_pass")]
    MaxVariantsNonPass,
    #[strum(serialize = "max_variants_gnomad")]
    MaxVariantsGnomad,
    #[strum(serialize = "max_variants_non_cancer_genes")]
    MaxVariantsNonCancerGenes,
    #[strum(serialize = "min_AF")]
    MinAf,
    #[strum(serialize = "min_AD")]
    MinAd,
    #[strum(serialize = "min_AD_difficult_region")]
    MinAdDifficult,
    #[strum(serialize = "min_AD_non_GIAB")]
    MinAdNonGiab,
    #[strum(serialize = "PON")]
    Pon,
    #[strum(serialize = "ENCODE")]
    Encode,
    #[strum(serialize = "gnomAD_common")]
    GnomadCommon
}

impl VcfFilter {
    /// The fixed FILTER ID
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// The header definition; threshold values are rendered into the description
    pub fn header_definition(self, thresholds: &FilterThresholds) -> HeaderDefinition {
        let description = match self {
            VcfFilter::SageLowconf => "Called but filtered by SAGE".to_string(),
            VcfFilter::MaxVariantsNonPass => "Non-pass variant removed when max variant count is exceeded".to_string(),
            VcfFilter::MaxVariantsGnomad => "Non-hotspot population variant removed when max variant count is exceeded".to_string(),
            VcfFilter::MaxVariantsNonCancerGenes => "Non-cancer gene variant removed when max variant count is exceeded".to_string(),
            VcfFilter::MinAf => format!("Somatic variant AF < {:.2}%", thresholds.min_af * 100.0),
            VcfFilter::MinAd => format!("Somatic variant AD < {}", thresholds.min_ad),
            VcfFilter::MinAdDifficult => format!(
                "Somatic variant AD < {} and in a difficult to call region (segmental duplications, GC 0-15%, GC 70-100%, LCR, low mappability mask)",
                thresholds.min_ad_difficult
            ),
            VcfFilter::MinAdNonGiab => format!(
                "Somatic variant AD < {} and not in a GIAB high confidence region",
                thresholds.min_ad_difficult
            ),
            VcfFilter::Pon => format!(
                "Somatic variant that is in {} or more samples from the panel of normals",
                thresholds.pon_hit_threshold
            ),
            VcfFilter::Encode => "ENCODE blocklist region https://github.com/Boyle-Lab/Blacklist".to_string(),
            VcfFilter::GnomadCommon => format!("gnomAD AF >= {}", thresholds.max_gnomad_af)
        };
        HeaderDefinition {
            namespace: HeaderNamespace::Filter,
            id: self.id(),
            number: None,
            value_type: None,
            description
        }
    }
}

/// All INFO fields this tool reads or writes
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
    strum_macros::Display, strum_macros::EnumIter, strum_macros::IntoStaticStr)]
pub enum VcfInfo {
    #[strum(serialize = "TUMOR_AF")]
    TumorAf,
    #[strum(serialize = "TUMOR_DP")]
    TumorDp,
    #[strum(serialize = "NORMAL_AF")]
    NormalAf,
    #[strum(serialize = "NORMAL_DP")]
    NormalDp,

    #[strum(serialize = "SAGE_HOTSPOT")]
    SageHotspot,
    #[strum(serialize = "SAGE_NOVEL")]
    SageNovel,
    #[strum(serialize = "SAGE_RESCUE")]
    SageRescue,

    #[strum(serialize = "PCGR_TIER")]
    PcgrTier,
    #[strum(serialize = "PCGR_CSQ")]
    PcgrCsq,
    #[strum(serialize = "PCGR_MUTATION_HOTSPOT")]
    PcgrMutationHotspot,
    #[strum(serialize = "PCGR_CLINVAR_CLNSIG")]
    PcgrClinvarClnsig,
    #[strum(serialize = "PCGR_COSMIC_COUNT")]
    PcgrCosmicCount,
    #[strum(serialize = "PCGR_TCGA_PANCANCER_COUNT")]
    PcgrTcgaPancancerCount,
    #[strum(serialize = "PCGR_ICGC_PCAWG_COUNT")]
    PcgrIcgcPcawgCount,

    #[strum(serialize = "PON_COUNT")]
    PonCount,
    #[strum(serialize = "HOTSPOT")]
    Hotspot,
    #[strum(serialize = "GIAB_CONF")]
    GiabConf,
    #[strum(serialize = "ENCODE")]
    Encode,
    #[strum(serialize = "SEGDUP")]
    Segdup,

    #[strum(serialize = "TRICKY_LCR")]
    TrickyLcr,
    #[strum(serialize = "TRICKY_bad_promoter")]
    TrickyBadPromoter,
    #[strum(serialize = "TRICKY_gc15")]
    TrickyGc15,
    #[strum(serialize = "TRICKY_gc15to20")]
    TrickyGc15to20,
    #[strum(serialize = "TRICKY_gc20to25")]
    TrickyGc20to25,
    #[strum(serialize = "TRICKY_gc25to30")]
    TrickyGc25to30,
    #[strum(serialize = "TRICKY_gc65to70")]
    TrickyGc65to70,
    #[strum(serialize = "TRICKY_gc70to75")]
    TrickyGc70to75,
    #[strum(serialize = "TRICKY_gc75to80")]
    TrickyGc75to80,
    #[strum(serialize = "TRICKY_gc80to85")]
    TrickyGc80to85,
    #[strum(serialize = "TRICKY_gc85")]
    TrickyGc85,
    #[strum(serialize = "TRICKY_heng_um75_hs37d5")]
    TrickyHengUm75Hs37d5,
    #[strum(serialize = "TRICKY_low_complexity_51to200bp")]
    TrickyLowComplexity51to200bp,
    #[strum(serialize = "TRICKY_low_complexity_gt200bp")]
    TrickyLowComplexityGt200bp,

    #[strum(serialize = "gnomAD_AF")]
    GnomadAf,

    #[strum(serialize = "PCGR_TIER_RESCUE")]
    PcgrTierRescue,
    #[strum(serialize = "SAGE_HOTSPOT_RESCUE")]
    SageHotspotRescue,
    #[strum(serialize = "CLINICAL_POTENTIAL_RESCUE")]
    ClinicalPotentialRescue,

    #[strum(serialize = "GERMLINE_LEAKAGE")]
    GermlineLeakage,

    #[strum(serialize = "ANN")]
    Ann,

    // structural variant inputs and outputs
    #[strum(serialize = "SVTYPE")]
    SvType,
    #[strum(serialize = "LOF")]
    Lof,
    #[strum(serialize = "PURPLE_CN")]
    PurpleCn,
    #[strum(serialize = "SIMPLE_ANN")]
    SimpleAnn,
    #[strum(serialize = "SV_TOP_TIER")]
    SvTopTier
}

/// The INFO flags that mark a region as difficult to call for the MIN_AD_DIFFICULT filter
pub const DIFFICULT_REGION_FLAGS: [VcfInfo; 10] = [
    VcfInfo::Segdup,
    VcfInfo::TrickyLcr,
    VcfInfo::TrickyGc15,
    VcfInfo::TrickyGc70to75,
    VcfInfo::TrickyGc75to80,
    VcfInfo::TrickyGc80to85,
    VcfInfo::TrickyGc85,
    VcfInfo::TrickyLowComplexity51to200bp,
    VcfInfo::TrickyLowComplexityGt200bp,
    VcfInfo::TrickyHengUm75Hs37d5
];

impl VcfInfo {
    /// The fixed INFO ID
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Returns true if this field belongs to the structural variant annotations
    pub fn is_sv_symbol(self) -> bool {
        matches!(self, VcfInfo::SvType | VcfInfo::Lof | VcfInfo::PurpleCn | VcfInfo::SimpleAnn | VcfInfo::SvTopTier)
    }

    /// Returns true if this is one of the flags emitted when filters are rescued
    pub fn is_rescue_flag(self) -> bool {
        matches!(self, VcfInfo::PcgrTierRescue | VcfInfo::SageHotspotRescue | VcfInfo::ClinicalPotentialRescue)
    }

    pub fn header_definition(self) -> HeaderDefinition {
        let (number, value_type, description): (&'static str, &'static str, &'static str) = match self {
            VcfInfo::TumorAf => ("1", "Float", "Tumor sample AF"),
            VcfInfo::TumorDp => ("1", "Integer", "Tumor sample DP"),
            VcfInfo::NormalAf => ("1", "Float", "Normal sample AF"),
            VcfInfo::NormalDp => ("1", "Integer", "Normal sample DP"),
            VcfInfo::SageHotspot => ("0", "Flag", "Variant called by SAGE in a provided hotspot location"),
            VcfInfo::SageNovel => ("0", "Flag", "Novel variant called by SAGE (AD, AF, DP, and SAGE_SB are taken used from the SAGE call)"),
            VcfInfo::SageRescue => ("0", "Flag", "Variant rescued by a matching SAGE call"),
            VcfInfo::PcgrTier => ("1", "String",
                "Tier reported by PCGR with the following meaning: TIER_1: strong clinical significance; \
                TIER_2: potential clinical significance; TIER_3: uncertain clinical significance; \
                TIER_4: other coding variants; NONCODING: other non-coding variants"),
            VcfInfo::PcgrCsq => (".", "String",
                "Consequence annotations from Ensembl VEP. Format: Allele|Consequence|IMPACT|SYMBOL|\
                Gene|Feature_type|Feature|BIOTYPE|EXON|INTRON|HGVSc|HGVSp|cDNA_position|\
                CDS_position|Protein_position|Amino_acids|Codons|Existing_variation|ALLELE_NUM|\
                DISTANCE|STRAND|FLAGS|PICK|VARIANT_CLASS|SYMBOL_SOURCE|HGNC_ID|CANONICAL|\
                MANE_SELECT|MANE_PLUS_CLINICAL|TSL|APPRIS|CCDS|ENSP|SWISSPROT|TREMBL|UNIPARC|\
                UNIPROT_ISOFORM|RefSeq|DOMAINS|HGVS_OFFSET|AF|AFR_AF|AMR_AF|EAS_AF|EUR_AF|SAS_AF|\
                gnomAD_AF|gnomAD_AFR_AF|gnomAD_AMR_AF|gnomAD_ASJ_AF|gnomAD_EAS_AF|gnomAD_FIN_AF|\
                gnomAD_NFE_AF|gnomAD_OTH_AF|gnomAD_SAS_AF|CLIN_SIG|SOMATIC|PHENO|CHECK_REF|\
                NearestExonJB"),
            VcfInfo::PcgrMutationHotspot => (".", "String", "Known cancer mutation hotspot, as found in cancerhotspots.org_v2, Gene|Codon|Q-value"),
            VcfInfo::PcgrClinvarClnsig => (".", "String", "ClinVar clinical significance"),
            VcfInfo::PcgrCosmicCount => ("1", "Integer", "Count of COSMIC mutations"),
            VcfInfo::PcgrTcgaPancancerCount => ("1", "Integer", "Raw variant count across all tumor types"),
            VcfInfo::PcgrIcgcPcawgCount => ("1", "Integer", "Count of ICGC PCAWG hits"),
            VcfInfo::PonCount => ("1", "Integer", "Number of panel of normals samples the variant was observed in"),
            VcfInfo::Hotspot => ("0", "Flag", "Variant in a curated mutation hotspot"),
            VcfInfo::GiabConf => ("0", "Flag", "Variant in a GIAB high confidence region"),
            VcfInfo::Encode => ("0", "Flag", "Variant in an ENCODE blocklist region"),
            VcfInfo::Segdup => ("0", "Flag", "Variant in a segmental duplication"),
            VcfInfo::TrickyLcr => ("0", "Flag", "Variant in a low complexity region"),
            VcfInfo::TrickyBadPromoter => ("0", "Flag", "Variant in a poorly covered promoter"),
            VcfInfo::TrickyGc15 => ("0", "Flag", "Variant in a region with GC content < 15%"),
            VcfInfo::TrickyGc15to20 => ("0", "Flag", "Variant in a region with GC content 15-20%"),
            VcfInfo::TrickyGc20to25 => ("0", "Flag", "Variant in a region with GC content 20-25%"),
            VcfInfo::TrickyGc25to30 => ("0", "Flag", "Variant in a region with GC content 25-30%"),
            VcfInfo::TrickyGc65to70 => ("0", "Flag", "Variant in a region with GC content 65-70%"),
            VcfInfo::TrickyGc70to75 => ("0", "Flag", "Variant in a region with GC content 70-75%"),
            VcfInfo::TrickyGc75to80 => ("0", "Flag", "Variant in a region with GC content 75-80%"),
            VcfInfo::TrickyGc80to85 => ("0", "Flag", "Variant in a region with GC content 80-85%"),
            VcfInfo::TrickyGc85 => ("0", "Flag", "Variant in a region with GC content > 85%"),
            VcfInfo::TrickyHengUm75Hs37d5 => ("0", "Flag", "Variant in a low mappability region"),
            VcfInfo::TrickyLowComplexity51to200bp => ("0", "Flag", "Variant in a low complexity region of 51-200bp"),
            VcfInfo::TrickyLowComplexityGt200bp => ("0", "Flag", "Variant in a low complexity region > 200bp"),
            VcfInfo::GnomadAf => ("1", "Float", "gnomAD population allele frequency"),
            VcfInfo::PcgrTierRescue => ("0", "Flag", "Filters cleared because the variant has a PCGR TIER_1 or TIER_2 classification"),
            VcfInfo::SageHotspotRescue => ("0", "Flag", "Filters cleared because the variant was called by SAGE in a hotspot"),
            VcfInfo::ClinicalPotentialRescue => ("0", "Flag",
                "Filters cleared because the variant has clinical potential (hotspot, ClinVar, COSMIC, TCGA, or PCAWG evidence)"),
            VcfInfo::GermlineLeakage => ("0", "Flag", "Somatic variant considered to be germline on the basis of PON hits or gnomAD AF"),
            VcfInfo::Ann => (".", "String",
                "Functional annotations: 'Allele | Annotation | Annotation_Impact | Gene_Name | \
                Gene_ID | Feature_Type | Feature_ID | Transcript_BioType | Rank | HGVS.c | HGVS.p | \
                cDNA.pos / cDNA.length | CDS.pos / CDS.length | AA.pos / AA.length | Distance | \
                ERRORS / WARNINGS / INFO'"),
            VcfInfo::SvType => ("1", "String", "Type of structural variant"),
            VcfInfo::Lof => (".", "String", "Predicted loss of function effects for this variant. Format: 'Gene_Name | Gene_ID | Number_of_transcripts_in_gene | Percent_of_transcripts_affected'"),
            VcfInfo::PurpleCn => (".", "Float", "Copy number estimate at each breakend"),
            VcfInfo::SimpleAnn => (".", "String",
                "Simplified structural variant annotation: 'SVTYPE | EFFECT | GENE(s) | TRANSCRIPT | DETAIL | PRIORITY (1-4)'"),
            VcfInfo::SvTopTier => ("1", "Integer", "Highest priority tier for the effects of a variant entry")
        };
        HeaderDefinition {
            namespace: HeaderNamespace::Info,
            id: self.id(),
            number: Some(number),
            value_type: Some(value_type),
            description: description.to_string()
        }
    }
}

/// All FORMAT fields declared by this tool
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd,
    strum_macros::Display, strum_macros::EnumIter, strum_macros::IntoStaticStr)]
pub enum VcfFormat {
    #[strum(serialize = "SAGE_AD")]
    SageAd,
    #[strum(serialize = "SAGE_AF")]
    SageAf,
    #[strum(serialize = "SAGE_DP")]
    SageDp,
    #[strum(serialize = "SAGE_SB")]
    SageSb
}

impl VcfFormat {
    pub fn id(self) -> &'static str {
        self.into()
    }

    pub fn header_definition(self) -> HeaderDefinition {
        let (number, value_type, description) = match self {
            VcfFormat::SageAd => ("R", "Integer", "Allelic depths for the ref and alt alleles in the order listed"),
            VcfFormat::SageAf => ("1", "Float", "Allelic frequency calculated from read context counts as (Full + Partial + Core + Realigned + Alt) / Coverage"),
            VcfFormat::SageDp => ("1", "Integer", "Approximate read depth (reads with MQ=255 or with bad mates are filtered)"),
            VcfFormat::SageSb => ("1", "Float", "Strand bias - percentage of first-in-pair reads")
        };
        HeaderDefinition {
            namespace: HeaderNamespace::Format,
            id: self.id(),
            number: Some(number),
            value_type: Some(value_type),
            description: description.to_string()
        }
    }
}

/// Every header definition used by the small variant workflow, in catalogue order
/// # Arguments
/// * `thresholds` - the active thresholds, rendered into the FILTER descriptions
pub fn small_variant_header_definitions(thresholds: &FilterThresholds) -> Vec<HeaderDefinition> {
    let filters = VcfFilter::iter().map(|f| f.header_definition(thresholds));
    let infos = VcfInfo::iter()
        .filter(|i| !i.is_sv_symbol())
        .map(|i| i.header_definition());
    let formats = VcfFormat::iter().map(|f| f.header_definition());
    filters.chain(infos).chain(formats).collect()
}

/// The header definitions written by the structural variant prioritization
pub fn sv_header_definitions() -> Vec<HeaderDefinition> {
    [VcfInfo::SimpleAnn, VcfInfo::SvTopTier].into_iter()
        .map(|i| i.header_definition())
        .collect()
}
