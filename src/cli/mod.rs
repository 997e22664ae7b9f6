
/// the main CLI module
pub mod core;
/// The small variant filter and rescue subcommand
pub mod smlv_filter;
/// The small variant selection subcommand
pub mod smlv_select;
/// The structural variant prioritization subcommand
pub mod sv_prioritize;
