
use log::{debug, trace};
use rust_htslib::bcf::{self, Read};
use std::path::Path;

use crate::data_types::vcf_symbols::sv_header_definitions;
use crate::sv::prioritizer::{PrioritizationStats, SvPrioritizer};
use crate::vcf::emitter::{apply_info, open_vcf_writer};
use crate::vcf::evidence::sv_record_evidence;
use crate::vcf::header::build_output_header;

/// Streams an SV VCF through the prioritizer, adding SIMPLE_ANN and SV_TOP_TIER to every record.
/// FILTER values are left as they are.
/// # Arguments
/// * `input_fn` - the input VCF
/// * `output_fn` - the output VCF, "-" for stdout
/// * `prioritizer` - the prioritizer with loaded reference data
/// # Errors
/// * if the VCFs cannot be read or written
/// * if an annotation entry violates the annotation contract, this stops the run
pub fn run_sv_prioritize(input_fn: &Path, output_fn: &Path, prioritizer: &SvPrioritizer) -> Result<PrioritizationStats, Box<dyn std::error::Error>> {
    let mut reader = bcf::Reader::from_path(input_fn)?;
    let header = build_output_header(reader.header(), &sv_header_definitions());
    let mut writer = open_vcf_writer(output_fn, &header)?;

    let mut stats = PrioritizationStats::default();
    for record in reader.records() {
        let mut record = record?;
        let evidence = sv_record_evidence(&record)?;
        let prioritization = prioritizer.prioritize(&evidence)?;
        trace!("{} => top tier {}", record.desc(), prioritization.top_tier());

        writer.translate(&mut record);
        apply_info(&mut record, &prioritization.to_record_annotation())?;
        writer.write(&record)?;
        stats.add(&prioritization);

        if stats.num_records % 10_000 == 0 {
            debug!("Processed {} records...", stats.num_records);
        }
    }

    stats.log_summary();
    Ok(stats)
}
