
use log::{debug, info, trace};
use rust_htslib::bcf::{self, Read};
use std::path::Path;

use crate::data_types::thresholds::{FilterThresholds, SelectionThresholds};
use crate::data_types::vcf_symbols::small_variant_header_definitions;
use crate::reference::gene_regions::GeneRegions;
use crate::smlv::selection::{SELECTION_CASCADE, SelectionCounts, SelectionStage, choose_selection_stage, select_record};
use crate::vcf::emitter::{apply_filters, open_vcf_writer};
use crate::vcf::evidence::selection_summary;
use crate::vcf::header::build_output_header;

/// The outcome of a selection run
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectionReport {
    /// The stage that was applied
    pub stage: SelectionStage,
    /// Per-stage retained counts from the first pass
    pub counts: SelectionCounts,
    /// Records written to the filtered output
    pub num_retained: usize
}

/// Counts the records each stage would retain
/// # Errors
/// * if the VCF cannot be read or a record cannot be parsed
fn count_stages(input_fn: &Path, cancer_genes: &GeneRegions, thresholds: &SelectionThresholds) -> Result<SelectionCounts, Box<dyn std::error::Error>> {
    let mut reader = bcf::Reader::from_path(input_fn)?;
    let mut counts = SelectionCounts::default();
    for record in reader.records() {
        let record = record?;
        let summary = selection_summary(&record, cancer_genes)?;
        counts.add(&summary, thresholds);
    }
    Ok(counts)
}

/// Caps the number of small variants forwarded to clinical annotation.
/// The input is read twice: once to count what each stage would keep, and once to write both outputs.
/// Every record goes to the selected output, with the stage FILTER on the ones that are not retained.
/// Only retained records go to the filtered output.
/// # Arguments
/// * `input_fn` - the input VCF, must be a file since it is read twice
/// * `selected_fn` - output with every record
/// * `filtered_fn` - output with only the retained records
/// * `cancer_genes` - padded cancer gene intervals
/// * `thresholds` - the cap and population AF cutoff
/// # Errors
/// * if the VCFs cannot be read or written
pub fn run_smlv_select(
    input_fn: &Path, selected_fn: &Path, filtered_fn: &Path,
    cancer_genes: &GeneRegions, thresholds: &SelectionThresholds
) -> Result<SelectionReport, Box<dyn std::error::Error>> {
    info!("Counting variants in {input_fn:?}...");
    let counts = count_stages(input_fn, cancer_genes, thresholds)?;
    info!("\tFound {} variants, maximum is {}", counts.num_records, thresholds.max_variants);
    for stage in SELECTION_CASCADE.iter() {
        debug!("\t{stage} would retain {}", counts.num_retained(*stage));
    }

    let stage = choose_selection_stage(&counts, thresholds.max_variants);
    info!("Applying selection stage: {stage}");

    let mut reader = bcf::Reader::from_path(input_fn)?;
    // the FILTER tags are in the small variant catalogue
    let header = build_output_header(reader.header(), &small_variant_header_definitions(&FilterThresholds::default()));
    let mut selected_writer = open_vcf_writer(selected_fn, &header)?;
    let mut filtered_writer = open_vcf_writer(filtered_fn, &header)?;

    let mut num_retained = 0;
    for record in reader.records() {
        let mut record = record?;
        let summary = selection_summary(&record, cancer_genes)?;
        let (annotation, retained) = select_record(stage, &summary, thresholds);
        trace!("{} => {} retained: {retained}", record.desc(), annotation.filters());

        selected_writer.translate(&mut record);
        apply_filters(&mut record, annotation.filters())?;
        selected_writer.write(&record)?;
        if retained {
            filtered_writer.write(&record)?;
            num_retained += 1;
        }
    }

    info!("Selected {num_retained} of {} variants", counts.num_records);
    Ok(SelectionReport {
        stage,
        counts,
        num_retained
    })
}
