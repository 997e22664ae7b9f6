
/// Parsing of the ANN entries into annotation units
pub mod annotation;
/// Errors for annotation contract violations
pub mod errors;
/// Grouping of classified units into the simplified annotation and top tier
pub mod prioritizer;
/// The ordered tier rules and copy number adjustment
pub mod tiering;
