/// Contains all the CLI related functionality
pub mod cli;
/// Contains the VCF symbol catalogue, per-record annotations, and threshold configuration
pub mod data_types;
/// Contains the loaders for gene lists, fusion lists, transcripts, and gene intervals
pub mod reference;
/// Contains the small variant filter, rescue, and selection logic
pub mod smlv;
/// Contains the structural variant annotation parsing and tiering logic
pub mod sv;
/// Contains generic utilities that are handy wrappers
pub mod util;
/// Contains the VCF reading, writing, and streaming workflows
pub mod vcf;
