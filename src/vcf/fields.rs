
use rust_htslib::bcf::record::{Numeric, Record};
use rust_htslib::errors::Error as HtslibError;

use crate::data_types::vcf_symbols::VcfInfo;
use crate::vcf::errors::RecordError;

/// Sentinel htslib uses to pad integer vectors
const INT_VECTOR_END: i32 = i32::MIN + 1;

fn unparseable(record: &Record, field: String, error: HtslibError) -> RecordError {
    RecordError::UnparseableField {
        record: record.desc(),
        field,
        reason: error.to_string()
    }
}

/// Reads an INFO flag; tags that are not declared in the header read as absent.
/// # Errors
/// * if the tag is declared with a type other than Flag
pub fn info_flag(record: &Record, tag: VcfInfo) -> Result<bool, RecordError> {
    match record.info(tag.id().as_bytes()).flag() {
        Ok(value) => Ok(value),
        Err(HtslibError::BcfUndefinedTag { .. }) => Ok(false),
        Err(e) => Err(unparseable(record, format!("INFO/{tag}"), e))
    }
}

/// Reads the first non-missing value of an integer INFO field.
/// # Errors
/// * if the tag is declared with a type other than Integer
pub fn info_integer(record: &Record, tag: VcfInfo) -> Result<Option<i32>, RecordError> {
    match record.info(tag.id().as_bytes()).integer() {
        Ok(Some(values)) => Ok(values.iter()
            .find(|&&v| v != INT_VECTOR_END && !v.is_missing())
            .copied()),
        Ok(None) | Err(HtslibError::BcfUndefinedTag { .. }) => Ok(None),
        Err(e) => Err(unparseable(record, format!("INFO/{tag}"), e))
    }
}

/// Reads every non-missing value of a float INFO field.
/// # Errors
/// * if the tag is declared with a type other than Float
pub fn info_floats(record: &Record, tag: VcfInfo) -> Result<Option<Vec<f64>>, RecordError> {
    match record.info(tag.id().as_bytes()).float() {
        Ok(Some(values)) => Ok(Some(values.iter()
            // missing and vector end are both NaN payloads
            .filter(|v| !v.is_nan())
            .map(|&v| v as f64)
            .collect())),
        Ok(None) | Err(HtslibError::BcfUndefinedTag { .. }) => Ok(None),
        Err(e) => Err(unparseable(record, format!("INFO/{tag}"), e))
    }
}

/// Reads the first non-missing value of a float INFO field.
/// # Errors
/// * if the tag is declared with a type other than Float
pub fn info_float(record: &Record, tag: VcfInfo) -> Result<Option<f64>, RecordError> {
    Ok(info_floats(record, tag)?.and_then(|values| values.first().copied()))
}

/// Reads a string INFO field as a list of comma-separated values; "." values are dropped.
/// # Errors
/// * if the tag is declared with a type other than String
/// * if the value is not valid UTF-8
pub fn info_strings(record: &Record, tag: VcfInfo) -> Result<Option<Vec<String>>, RecordError> {
    let raw_values = match record.info(tag.id().as_bytes()).string() {
        Ok(Some(values)) => values,
        Ok(None) | Err(HtslibError::BcfUndefinedTag { .. }) => return Ok(None),
        Err(e) => return Err(unparseable(record, format!("INFO/{tag}"), e))
    };

    let mut values = vec![];
    for raw_value in raw_values.iter() {
        let value = std::str::from_utf8(raw_value).map_err(|e| RecordError::UnparseableField {
            record: record.desc(),
            field: format!("INFO/{tag}"),
            reason: e.to_string()
        })?;
        values.extend(value.split(',')
            .filter(|v| !v.is_empty() && *v != ".")
            .map(|v| v.to_string()));
    }
    Ok(Some(values))
}

/// The FILTER IDs on a record in column order, empty when the column is "."
pub fn filter_ids(record: &Record) -> Vec<String> {
    let header = record.header();
    record.filters()
        .map(|filter_id| String::from_utf8_lossy(&header.id_to_name(filter_id)).to_string())
        .collect()
}

/// The chromosome name of a record
/// # Errors
/// * if the record has no contig or the contig is not in the header
pub fn contig_name(record: &Record) -> Result<String, RecordError> {
    let rid = record.rid().ok_or_else(|| RecordError::UnparseableField {
        record: record.desc(),
        field: "CHROM".to_string(),
        reason: "record has no contig".to_string()
    })?;
    let name = record.header().rid2name(rid)
        .map_err(|e| unparseable(record, "CHROM".to_string(), e))?;
    Ok(String::from_utf8_lossy(name).to_string())
}

/// Reads the alt allele depth of one sample, the second value of FORMAT/AD
/// # Arguments
/// * `record` - the record to read
/// * `sample_index` - index of the sample in the VCF columns
/// * `sample_name` - used for error reporting
/// # Errors
/// * if FORMAT/AD is absent, or the alt depth is missing for the sample
pub fn sample_alt_depth(record: &Record, sample_index: usize, sample_name: &str) -> Result<i32, RecordError> {
    let missing = || RecordError::MissingFormat {
        record: record.desc(),
        tag: "AD".to_string(),
        sample: sample_name.to_string()
    };
    let depths = record.format(b"AD").integer().map_err(|_| missing())?;
    let alt_depth = depths.get(sample_index)
        .and_then(|sample_depths| sample_depths.get(1))
        .copied()
        .ok_or_else(missing)?;
    if alt_depth.is_missing() || alt_depth == INT_VECTOR_END {
        return Err(missing());
    }
    Ok(alt_depth)
}

/// Reads the allele fraction of one sample, the first value of FORMAT/AF
/// # Arguments
/// * `record` - the record to read
/// * `sample_index` - index of the sample in the VCF columns
/// * `sample_name` - used for error reporting
/// # Errors
/// * if FORMAT/AF is absent, or missing for the sample
pub fn sample_allele_fraction(record: &Record, sample_index: usize, sample_name: &str) -> Result<f64, RecordError> {
    let missing = || RecordError::MissingFormat {
        record: record.desc(),
        tag: "AF".to_string(),
        sample: sample_name.to_string()
    };
    let fractions = record.format(b"AF").float().map_err(|_| missing())?;
    let af = fractions.get(sample_index)
        .and_then(|sample_fractions| sample_fractions.first())
        .copied()
        .ok_or_else(missing)?;
    if af.is_missing() || af.is_nan() {
        return Err(missing());
    }
    Ok(af as f64)
}

/// Finds the index of the requested sample; if none is requested, the first sample is used
/// # Arguments
/// * `samples` - the sample names in VCF column order
/// * `opt_name` - the optional sample name to look for
/// # Errors
/// * if there are no samples
/// * if the requested sample is not present
pub fn resolve_sample_index(samples: &[String], opt_name: Option<&str>) -> Result<usize, RecordError> {
    if samples.is_empty() {
        return Err(RecordError::NoSamples);
    }
    match opt_name {
        Some(name) => samples.iter()
            .position(|s| s == name)
            .ok_or_else(|| RecordError::UnknownSample {
                name: name.to_string(),
                samples: samples.to_vec()
            }),
        None => Ok(0)
    }
}
