
use log::debug;
use rust_htslib::bcf::{self, Header, Record, Writer};
use std::path::Path;

use crate::data_types::record_annotation::{FilterSet, InfoValue, RecordAnnotation};

/// Path that sends output to stdout
pub const STDOUT_PATH: &str = "-";

/// Opens a VCF writer; ".gz" paths are BGZF compressed and "-" writes to stdout
/// # Arguments
/// * `filename` - the output path
/// * `header` - the fully registered output header
/// # Errors
/// * if the output cannot be opened
pub fn open_vcf_writer(filename: &Path, header: &Header) -> Result<Writer, Box<dyn std::error::Error>> {
    let writer = if filename.as_os_str() == STDOUT_PATH {
        debug!("Writing VCF to stdout");
        Writer::from_stdout(header, true, bcf::Format::Vcf)?
    } else {
        let uncompressed = filename.extension().unwrap_or_default() != "gz";
        debug!("Writing VCF to {filename:?}, compressed: {}", !uncompressed);
        Writer::from_path(filename, header, uncompressed, bcf::Format::Vcf)?
    };
    Ok(writer)
}

/// Replaces the FILTER column with the filter set, PASS when it is empty.
/// The record must already use the output header.
/// # Errors
/// * if a filter ID is not declared in the header
pub fn apply_filters(record: &mut Record, filters: &FilterSet) -> Result<(), Box<dyn std::error::Error>> {
    let ids: Vec<&[u8]> = filters.ids().into_iter()
        .map(|id| id.as_bytes())
        .collect();
    record.set_filters(&ids)?;
    Ok(())
}

/// Writes every INFO entry of the annotation, replacing any prior value.
/// The record must already use the output header.
/// # Errors
/// * if an INFO tag is not declared in the header
pub fn apply_info(record: &mut Record, annotation: &RecordAnnotation) -> Result<(), Box<dyn std::error::Error>> {
    for (key, value) in annotation.info().iter() {
        let tag = key.id().as_bytes();
        match value {
            InfoValue::Flag => record.push_info_flag(tag)?,
            InfoValue::Integer(v) => record.push_info_integer(tag, &[*v])?,
            InfoValue::Strings(values) => {
                let values: Vec<&[u8]> = values.iter().map(|v| v.as_bytes()).collect();
                record.push_info_string(tag, &values)?;
            }
        }
    }
    Ok(())
}

/// Applies both the FILTER and INFO parts of an annotation
/// # Errors
/// * if any ID is not declared in the header
pub fn apply_annotation(record: &mut Record, annotation: &RecordAnnotation) -> Result<(), Box<dyn std::error::Error>> {
    apply_filters(record, annotation.filters())?;
    apply_info(record, annotation)
}
