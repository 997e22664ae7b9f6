
/// Contains the owned per-record FILTER/INFO annotation handed to the writer
pub mod record_annotation;
/// Thresholds for the filter, rescue, and selection rules
pub mod thresholds;
/// Contains the closed catalogue of FILTER/INFO/FORMAT symbols and their header definitions
pub mod vcf_symbols;
