
/// Writes annotations back to records and opens output VCFs
pub mod emitter;
/// Errors for malformed input records
pub mod errors;
/// Converts records into the evidence the classifiers consume
pub mod evidence;
/// Tolerant readers for INFO, FORMAT, and FILTER values
pub mod fields;
/// Output header registration
pub mod header;
/// The small variant filter and rescue workflow
pub mod smlv_filter;
/// The variant-count-driven selection workflow
pub mod smlv_select;
/// The structural variant prioritization workflow
pub mod sv_prioritize;
