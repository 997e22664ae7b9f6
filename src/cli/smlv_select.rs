
use clap::Args;
use log::info;
use simple_error::bail;
use std::path::PathBuf;

use crate::cli::core::{AFTER_HELP, check_required_filename};
use crate::data_types::thresholds::{CANCER_GENE_PADDING, MAX_SOMATIC_VARIANTS, MAX_SOMATIC_VARIANTS_GNOMAD_FILTER, SelectionThresholds};

#[derive(Args, Clone, Default)]
#[clap(author, about,
    after_help = &**AFTER_HELP)]
pub struct SmlvSelectSettings {
    /// Input somatic small variant file in VCF format, read twice
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub input_vcf: PathBuf,

    /// Cancer gene intervals in BED format
    #[clap(required = true)]
    #[clap(long = "cancer-genes")]
    #[clap(value_name = "BED")]
    #[clap(help_heading = Some("Input/Output"))]
    pub cancer_genes_bed: PathBuf,

    /// Output VCF with every record, excluded records carry a max_variants FILTER
    #[clap(required = true)]
    #[clap(long = "output-selected")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub selected_vcf: PathBuf,

    /// Output VCF with only the retained records
    #[clap(required = true)]
    #[clap(long = "output-filtered")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub filtered_vcf: PathBuf,

    /// Maximum number of variants forwarded to clinical annotation
    #[clap(long = "max-variants")]
    #[clap(value_name = "COUNT")]
    #[clap(default_value_t = MAX_SOMATIC_VARIANTS)]
    #[clap(help_heading = Some("Selection"))]
    pub max_variants: usize,

    /// Variants with a gnomAD AF at or above this are excluded by the population stage
    #[clap(long = "max-gnomad-af")]
    #[clap(value_name = "FLOAT")]
    #[clap(default_value_t = MAX_SOMATIC_VARIANTS_GNOMAD_FILTER)]
    #[clap(help_heading = Some("Selection"))]
    pub max_gnomad_af: f64,

    /// Padding added to both sides of each cancer gene interval
    #[clap(long = "gene-padding")]
    #[clap(value_name = "BP")]
    #[clap(default_value_t = CANCER_GENE_PADDING)]
    #[clap(help_heading = Some("Selection"))]
    pub gene_padding: u64,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl SmlvSelectSettings {
    pub fn thresholds(&self) -> SelectionThresholds {
        SelectionThresholds {
            max_variants: self.max_variants,
            max_gnomad_af: self.max_gnomad_af,
            gene_padding: self.gene_padding
        }
    }
}

pub fn check_smlv_select_settings(settings: SmlvSelectSettings) -> Result<SmlvSelectSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");
    if settings.input_vcf.as_os_str() == "-" {
        bail!("Input VCF must be a file, selection reads it twice");
    }
    check_required_filename(&settings.input_vcf, "Input VCF");
    check_required_filename(&settings.cancer_genes_bed, "Cancer gene BED");
    info!("\tVCF: {:?}", settings.input_vcf);
    info!("\tCancer genes: {:?}", settings.cancer_genes_bed);

    info!("Outputs:");
    if settings.selected_vcf == settings.filtered_vcf {
        bail!("--output-selected and --output-filtered must be different files");
    }
    info!("\tSelected VCF: {:?}", settings.selected_vcf);
    info!("\tFiltered VCF: {:?}", settings.filtered_vcf);

    info!("Settings:");
    if settings.max_variants == 0 {
        bail!("--max-variants must be greater than 0");
    }
    info!("\tMaximum variants: {}", settings.max_variants);
    if !(0.0..=1.0).contains(&settings.max_gnomad_af) {
        bail!("--max-gnomad-af must be between 0.0 and 1.0");
    }
    info!("\tMaximum gnomAD AF: {}", settings.max_gnomad_af);
    info!("\tGene padding: {}", settings.gene_padding);

    Ok(settings)
}
