
use rust_htslib::bcf::Record;

use crate::data_types::vcf_symbols::{DIFFICULT_REGION_FLAGS, VcfInfo};
use crate::reference::gene_regions::GeneRegions;
use crate::smlv::evidence::{ClinicalEvidence, SmallVariantEvidence};
use crate::smlv::selection::SelectionSummary;
use crate::sv::prioritizer::SvRecordEvidence;
use crate::vcf::errors::RecordError;
use crate::vcf::fields::{contig_name, filter_ids, info_flag, info_float, info_floats, info_integer, info_strings, sample_allele_fraction, sample_alt_depth};

/// The tumor sample of a small variant VCF
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TumorSample {
    pub index: usize,
    pub name: String
}

/// Reads the clinical annotations that can rescue a record
/// # Errors
/// * if a declared INFO field has an unexpected type
pub fn clinical_evidence(record: &Record) -> Result<ClinicalEvidence, RecordError> {
    Ok(ClinicalEvidence {
        pcgr_tier: info_strings(record, VcfInfo::PcgrTier)?
            .and_then(|tiers| tiers.into_iter().next()),
        sage_hotspot: info_flag(record, VcfInfo::SageHotspot)?,
        hotspot: info_flag(record, VcfInfo::Hotspot)?,
        pcgr_mutation_hotspot: info_strings(record, VcfInfo::PcgrMutationHotspot)?
            .map(|values| !values.is_empty())
            .unwrap_or(false),
        clinvar_clnsig: info_strings(record, VcfInfo::PcgrClinvarClnsig)?.unwrap_or_default(),
        cosmic_count: info_integer(record, VcfInfo::PcgrCosmicCount)?.unwrap_or(0),
        tcga_pancancer_count: info_integer(record, VcfInfo::PcgrTcgaPancancerCount)?.unwrap_or(0),
        icgc_pcawg_count: info_integer(record, VcfInfo::PcgrIcgcPcawgCount)?.unwrap_or(0)
    })
}

/// Reads everything the filter and rescue rules need from one record.
/// Absent INFO values take their defaults: flags are false, counts are 0, and gnomAD AF is 0.0.
/// # Arguments
/// * `record` - the small variant record
/// * `tumor` - the sample to read AD and AF from
/// # Errors
/// * if the tumor sample is missing FORMAT/AD or FORMAT/AF
/// * if a declared INFO field has an unexpected type
pub fn small_variant_evidence(record: &Record, tumor: &TumorSample) -> Result<SmallVariantEvidence, RecordError> {
    let mut difficult_region = false;
    for flag in DIFFICULT_REGION_FLAGS.iter() {
        if info_flag(record, *flag)? {
            difficult_region = true;
            break;
        }
    }

    Ok(SmallVariantEvidence {
        existing_filters: filter_ids(record),
        alt_depth: sample_alt_depth(record, tumor.index, &tumor.name)?,
        allele_fraction: sample_allele_fraction(record, tumor.index, &tumor.name)?,
        difficult_region,
        giab_high_confidence: info_flag(record, VcfInfo::GiabConf)?,
        encode_blocklist: info_flag(record, VcfInfo::Encode)?,
        pon_count: info_integer(record, VcfInfo::PonCount)?.unwrap_or(0),
        gnomad_af: info_float(record, VcfInfo::GnomadAf)?.unwrap_or(0.0),
        clinical: clinical_evidence(record)?
    })
}

/// Reads what variant selection needs from one record.
/// Cancer gene overlap uses the reference span of the record.
/// # Arguments
/// * `record` - the small variant record
/// * `cancer_genes` - padded cancer gene intervals
/// # Errors
/// * if the contig cannot be resolved
/// * if a declared INFO field has an unexpected type
pub fn selection_summary(record: &Record, cancer_genes: &GeneRegions) -> Result<SelectionSummary, RecordError> {
    let existing_filters = filter_ids(record);
    let is_pass = existing_filters.iter().all(|f| f == "PASS");

    let chrom = contig_name(record)?;
    let start = record.pos().max(0) as u64;
    let end = (record.end().max(0) as u64).max(start + 1);

    Ok(SelectionSummary {
        existing_filters,
        is_pass,
        hotspot: info_flag(record, VcfInfo::Hotspot)?,
        gnomad_af: info_float(record, VcfInfo::GnomadAf)?.unwrap_or(0.0),
        in_cancer_gene: cancer_genes.overlaps(&chrom, start, end)
    })
}

/// Reads the INFO values the SV prioritization uses
/// # Errors
/// * if a declared INFO field has an unexpected type
pub fn sv_record_evidence(record: &Record) -> Result<SvRecordEvidence, RecordError> {
    let sv_type = info_strings(record, VcfInfo::SvType)?
        .and_then(|values| values.into_iter().next())
        .unwrap_or_default();
    let copy_numbers = info_floats(record, VcfInfo::PurpleCn)?
        .filter(|values| !values.is_empty());

    Ok(SvRecordEvidence {
        sv_type,
        annotations: info_strings(record, VcfInfo::Ann)?,
        lof: info_strings(record, VcfInfo::Lof)?.unwrap_or_default(),
        copy_numbers
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_approx_eq::assert_approx_eq;

    use rust_htslib::bcf::{self, Read};
    use std::path::Path;

    fn load_records(filename: &str) -> Vec<Record> {
        let mut reader = bcf::Reader::from_path(filename).unwrap();
        reader.records().map(|r| r.unwrap()).collect()
    }

    fn tumor() -> TumorSample {
        TumorSample { index: 1, name: "tumor".to_string() }
    }

    #[test]
    fn test_small_variant_evidence() {
        let records = load_records("test_data/smlv_somatic.vcf");

        let evidence = small_variant_evidence(&records[0], &tumor()).unwrap();
        assert_eq!(evidence.existing_filters, vec!["PASS".to_string()]);
        assert_eq!(evidence.alt_depth, 6);
        assert_approx_eq!(evidence.allele_fraction, 0.1);
        assert!(evidence.giab_high_confidence);
        assert!(!evidence.difficult_region);
        assert!(evidence.clinical.hotspot);
        assert_eq!(evidence.pon_count, 0);
        assert_eq!(evidence.gnomad_af, 0.0);

        let evidence = small_variant_evidence(&records[1], &tumor()).unwrap();
        assert!(evidence.existing_filters.is_empty());
        assert_eq!(evidence.pon_count, 2);

        let evidence = small_variant_evidence(&records[2], &tumor()).unwrap();
        assert_eq!(evidence.clinical.pcgr_tier.as_deref(), Some("TIER_1"));

        let evidence = small_variant_evidence(&records[4], &tumor()).unwrap();
        assert!(evidence.clinical.sage_hotspot);
        assert!(!evidence.giab_high_confidence);
        assert_eq!(evidence.alt_depth, 3);
    }

    #[test]
    fn test_missing_tumor_format() {
        let records = load_records("test_data/smlv_missing_ad.vcf");
        assert!(matches!(
            small_variant_evidence(&records[0], &tumor()),
            Err(RecordError::MissingFormat { .. })
        ));
    }

    #[test]
    fn test_selection_summary() {
        let regions = GeneRegions::from_bed(Path::new("test_data/cancer_genes.bed"), 1000).unwrap();
        let records = load_records("test_data/smlv_somatic.vcf");

        let summary = selection_summary(&records[0], &regions).unwrap();
        assert!(summary.is_pass);
        assert!(summary.hotspot);
        assert!(summary.in_cancer_gene);

        // missing FILTER counts as PASS; outside of KRAS
        let summary = selection_summary(&records[1], &regions).unwrap();
        assert!(summary.is_pass);
        assert!(!summary.in_cancer_gene);

        let summary = selection_summary(&records[3], &regions).unwrap();
        assert_approx_eq!(summary.gnomad_af, 0.02);

        let summary = selection_summary(&records[6], &regions).unwrap();
        assert!(!summary.is_pass);
        assert_eq!(summary.existing_filters, vec!["SAGE_lowconf".to_string()]);
    }

    #[test]
    fn test_sv_record_evidence() {
        let records = load_records("test_data/sv_somatic.vcf");

        let evidence = sv_record_evidence(&records[0]).unwrap();
        assert_eq!(evidence.sv_type, "INV");
        assert_eq!(evidence.annotations.as_ref().map(|a| a.len()), Some(1));
        assert!(evidence.lof.is_empty());
        assert_eq!(evidence.copy_numbers, None);

        let evidence = sv_record_evidence(&records[1]).unwrap();
        let copy_numbers = evidence.copy_numbers.unwrap();
        assert_eq!(copy_numbers.len(), 2);
        assert_approx_eq!(copy_numbers[0], 0.1);

        let evidence = sv_record_evidence(&records[2]).unwrap();
        assert_eq!(evidence.sv_type, "DUP");
        assert_eq!(evidence.annotations, None);

        let evidence = sv_record_evidence(&records[3]).unwrap();
        assert_eq!(evidence.lof, vec!["(TP53|ENSG00000141510|1|1.00)".to_string()]);
    }
}
