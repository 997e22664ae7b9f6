
use log::{debug, info, trace};
use rust_htslib::bcf::{self, Read};
use std::path::Path;

use crate::data_types::vcf_symbols::small_variant_header_definitions;
use crate::smlv::classifier::{ClassificationStats, SmallVariantClassifier};
use crate::vcf::emitter::{apply_annotation, open_vcf_writer};
use crate::vcf::evidence::{TumorSample, small_variant_evidence};
use crate::vcf::fields::resolve_sample_index;
use crate::vcf::header::build_output_header;

/// Looks up the tumor sample in a VCF header
/// # Arguments
/// * `header` - the input header
/// * `tumor_name` - the requested sample, the first sample is used if None
/// # Errors
/// * if the header has no samples or the requested sample is absent
pub fn find_tumor_sample(header: &bcf::header::HeaderView, tumor_name: Option<&str>) -> Result<TumorSample, Box<dyn std::error::Error>> {
    let mut samples = vec![];
    for sample in header.samples().iter() {
        samples.push(std::str::from_utf8(sample)?.to_string());
    }
    let index = resolve_sample_index(&samples, tumor_name)?;
    Ok(TumorSample {
        index,
        name: samples[index].clone()
    })
}

/// Streams a small variant VCF through the filter and rescue classifier.
/// Records are written in input order with their FILTER column replaced and any GERMLINE_LEAKAGE or rescue flags added.
/// # Arguments
/// * `input_fn` - the input VCF
/// * `output_fn` - the output VCF, "-" for stdout
/// * `tumor_name` - the sample to read AD and AF from, the first sample if None
/// * `classifier` - the configured classifier
/// # Errors
/// * if the VCFs cannot be read or written
/// * if a record is missing the tumor AD or AF
pub fn run_smlv_filter(
    input_fn: &Path, output_fn: &Path, tumor_name: Option<&str>, classifier: &SmallVariantClassifier
) -> Result<ClassificationStats, Box<dyn std::error::Error>> {
    let mut reader = bcf::Reader::from_path(input_fn)?;
    let tumor = find_tumor_sample(reader.header(), tumor_name)?;
    info!("Using tumor sample \"{}\" (column {})", tumor.name, tumor.index);

    let header = build_output_header(reader.header(), &small_variant_header_definitions(classifier.thresholds()));
    let mut writer = open_vcf_writer(output_fn, &header)?;

    let mut stats = ClassificationStats::default();
    for record in reader.records() {
        let mut record = record?;
        let evidence = small_variant_evidence(&record, &tumor)?;
        let annotation = classifier.classify(&evidence);
        trace!("{} => {}", record.desc(), annotation.filters());

        writer.translate(&mut record);
        apply_annotation(&mut record, &annotation)?;
        writer.write(&record)?;
        stats.add(&annotation);

        if stats.num_records % 100_000 == 0 {
            debug!("Processed {} records...", stats.num_records);
        }
    }

    stats.log_summary();
    Ok(stats)
}
