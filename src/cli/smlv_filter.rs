
use clap::Args;
use log::info;
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_optional_filename, check_required_filename};
use crate::util::htslib_quickparse::get_vcf_samples;

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct SmlvFilterSettings {
    /// Input somatic small variant file in VCF format
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_vcf: PathBuf,

    /// Output VCF with updated FILTER and INFO; ".gz" for BGZF, "-" for stdout
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_vcf: PathBuf,

    /// Optional JSON file overriding the default filter and rescue thresholds
    #[clap(long = "thresholds")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub thresholds_fn: Option<PathBuf>,

    /// Name of the tumor sample; defaults to the first sample in the VCF
    #[clap(long = "tumor-name")]
    #[clap(value_name = "SAMPLE")]
    #[clap(help_heading = Some("Filtering"))]
    pub tumor_name: Option<String>,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_smlv_filter_settings(settings: SmlvFilterSettings) -> Result<SmlvFilterSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    check_required_filename(&settings.input_vcf, "Input VCF");
    check_optional_filename(settings.thresholds_fn.as_deref(), "Thresholds JSON");

    info!("\tVCF: {:?}", settings.input_vcf);
    match settings.thresholds_fn.as_ref() {
        Some(filename) => info!("\tThresholds: {filename:?}"),
        None => info!("\tThresholds: default")
    };

    info!("Outputs:");
    if settings.output_vcf == settings.input_vcf {
        bail!("Output VCF cannot be the same as the input VCF");
    }
    info!("\tVCF: {:?}", settings.output_vcf);

    info!("Settings:");
    if let Some(tumor_name) = settings.tumor_name.as_ref() {
        let samples = get_vcf_samples(&settings.input_vcf)?;
        if !samples.contains(tumor_name) {
            bail!("--tumor-name \"{tumor_name}\" was not found in VCF samples: {samples:?}");
        }
        info!("\tTumor sample: {tumor_name}");
    } else {
        info!("\tTumor sample: first sample in VCF");
    }

    Ok(settings)
}
