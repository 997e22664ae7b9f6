
use clap::Args;
use log::info;
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_required_filename};
use crate::reference::SvReferencePaths;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct SvPrioritizeSettings {
    /// Input annotated structural variant file in VCF format
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_vcf: PathBuf,

    /// Output VCF with SIMPLE_ANN and SV_TOP_TIER added; ".gz" for BGZF, "-" for stdout
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_vcf: PathBuf,

    /// Key cancer genes, one per line
    #[clap(required = true)]
    #[clap(long = "key-genes")]
    #[clap(value_name = "TXT")]
    #[clap(help_heading = Some("Reference"))]
    pub key_genes: PathBuf,

    /// Key tumor suppressor genes, one per line
    #[clap(required = true)]
    #[clap(long = "key-tsgenes")]
    #[clap(value_name = "TXT")]
    #[clap(help_heading = Some("Reference"))]
    pub key_tsgenes: PathBuf,

    /// Known fusion pairs
    #[clap(required = true)]
    #[clap(long = "known-fusion-pairs")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Reference"))]
    pub known_fusion_pairs: PathBuf,

    /// Known promiscuous 5' fusion genes
    #[clap(required = true)]
    #[clap(long = "known-fusion-five")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Reference"))]
    pub known_fusion_five: PathBuf,

    /// Known promiscuous 3' fusion genes
    #[clap(required = true)]
    #[clap(long = "known-fusion-three")]
    #[clap(value_name = "CSV")]
    #[clap(help_heading = Some("Reference"))]
    pub known_fusion_three: PathBuf,

    /// APPRIS principal and alternative transcript table
    #[clap(required = true)]
    #[clap(long = "appris")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Reference"))]
    pub appris: PathBuf,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl SvPrioritizeSettings {
    pub fn reference_paths(&self) -> SvReferencePaths<'_> {
        SvReferencePaths {
            key_genes: &self.key_genes,
            key_tsgenes: &self.key_tsgenes,
            known_fusion_pairs: &self.known_fusion_pairs,
            known_fusion_five: &self.known_fusion_five,
            known_fusion_three: &self.known_fusion_three,
            appris: &self.appris
        }
    }
}

pub fn check_sv_prioritize_settings(settings: SvPrioritizeSettings) -> Result<SvPrioritizeSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    check_required_filename(&settings.input_vcf, "Input VCF");
    check_required_filename(&settings.key_genes, "Key genes");
    check_required_filename(&settings.key_tsgenes, "Key tumor suppressor genes");
    check_required_filename(&settings.known_fusion_pairs, "Known fusion pairs");
    check_required_filename(&settings.known_fusion_five, "Known promiscuous 5' genes");
    check_required_filename(&settings.known_fusion_three, "Known promiscuous 3' genes");
    check_required_filename(&settings.appris, "APPRIS table");

    info!("\tVCF: {:?}", settings.input_vcf);
    info!("\tKey genes: {:?}", settings.key_genes);
    info!("\tKey tumor suppressors: {:?}", settings.key_tsgenes);
    info!("\tKnown fusion pairs: {:?}", settings.known_fusion_pairs);
    info!("\tKnown promiscuous 5': {:?}", settings.known_fusion_five);
    info!("\tKnown promiscuous 3': {:?}", settings.known_fusion_three);
    info!("\tAPPRIS: {:?}", settings.appris);

    info!("Outputs:");
    if settings.output_vcf == settings.input_vcf {
        bail!("Output VCF cannot be the same as the input VCF");
    }
    info!("\tVCF: {:?}", settings.output_vcf);

    Ok(settings)
}
