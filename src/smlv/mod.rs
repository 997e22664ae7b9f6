
/// Two-phase classification of a small variant: FILTER assignment then rescue
pub mod classifier;
/// The per-record inputs to the classifier
pub mod evidence;
/// The quality FILTER rules
pub mod filter;
/// The clinical rescue rules
pub mod rescue;
/// Variant-count driven selection ahead of clinical annotation
pub mod selection;
