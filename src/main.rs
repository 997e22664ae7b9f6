
use log::{LevelFilter, error, info};

use oncotier::cli::core::{Commands, get_cli};
use oncotier::cli::smlv_filter::{SmlvFilterSettings, check_smlv_filter_settings};
use oncotier::cli::smlv_select::{SmlvSelectSettings, check_smlv_select_settings};
use oncotier::cli::sv_prioritize::{SvPrioritizeSettings, check_sv_prioritize_settings};
use oncotier::data_types::thresholds::FilterThresholds;
use oncotier::reference::SvReferenceData;
use oncotier::reference::gene_regions::GeneRegions;
use oncotier::smlv::classifier::SmallVariantClassifier;
use oncotier::sv::errors::SvAnnotationError;
use oncotier::sv::prioritizer::SvPrioritizer;
use oncotier::util::file_io::load_json;
use oncotier::vcf::errors::RecordError;

/// Sets up the logger, this must happen before anything else is logged
/// # Arguments
/// * `verbosity` - the number of times -v was provided
fn init_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

/// Picks the exit code for an error from one of the streaming workflows.
/// Problems with the content of the input are data errors, everything else is I/O.
fn workflow_exit_code(e: &(dyn std::error::Error + 'static)) -> i32 {
    if e.is::<SvAnnotationError>() || e.is::<RecordError>() {
        exitcode::DATAERR
    } else {
        exitcode::IOERR
    }
}

/// This will run the "smlv-filter" mode of the tool
/// # Arguments
/// * `settings` - the SmlvFilterSettings object
fn run_smlv_filter(settings: SmlvFilterSettings) {
    init_logging(settings.verbosity);

    let cli_settings: SmlvFilterSettings = match check_smlv_filter_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    let thresholds: FilterThresholds = if let Some(thresholds_fn) = cli_settings.thresholds_fn.as_ref() {
        match load_json(thresholds_fn) {
            Ok(t) => t,
            Err(e) => {
                error!("Error while loading thresholds: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }
    } else {
        FilterThresholds::default()
    };
    if let Err(e) = thresholds.validate() {
        error!("Error while validating thresholds: {e}");
        std::process::exit(exitcode::USAGE);
    }
    info!("Thresholds: {thresholds:#?}");

    let classifier = SmallVariantClassifier::new(thresholds);
    if let Err(e) = oncotier::vcf::smlv_filter::run_smlv_filter(
        &cli_settings.input_vcf,
        &cli_settings.output_vcf,
        cli_settings.tumor_name.as_deref(),
        &classifier
    ) {
        error!("Error while filtering small variants: {e}");
        std::process::exit(workflow_exit_code(e.as_ref()));
    }
}

/// This will run the "smlv-select" mode of the tool
/// # Arguments
/// * `settings` - the SmlvSelectSettings object
fn run_smlv_select(settings: SmlvSelectSettings) {
    init_logging(settings.verbosity);

    let cli_settings: SmlvSelectSettings = match check_smlv_select_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };
    let thresholds = cli_settings.thresholds();

    info!("Loading cancer gene intervals from {:?}...", cli_settings.cancer_genes_bed);
    let cancer_genes: GeneRegions = match GeneRegions::from_bed(&cli_settings.cancer_genes_bed, thresholds.gene_padding) {
        Ok(g) => g,
        Err(e) => {
            error!("Error while loading cancer gene intervals: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("\tLoaded {} padded intervals.", cancer_genes.num_intervals());

    if let Err(e) = oncotier::vcf::smlv_select::run_smlv_select(
        &cli_settings.input_vcf,
        &cli_settings.selected_vcf,
        &cli_settings.filtered_vcf,
        &cancer_genes,
        &thresholds
    ) {
        error!("Error while selecting small variants: {e}");
        std::process::exit(workflow_exit_code(e.as_ref()));
    }
}

/// This will run the "sv-prioritize" mode of the tool
/// # Arguments
/// * `settings` - the SvPrioritizeSettings object
fn run_sv_prioritize(settings: SvPrioritizeSettings) {
    init_logging(settings.verbosity);

    let cli_settings: SvPrioritizeSettings = match check_sv_prioritize_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    let reference: SvReferenceData = match SvReferenceData::load(&cli_settings.reference_paths()) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while loading reference data: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    let prioritizer = SvPrioritizer::new(reference);
    if let Err(e) = oncotier::vcf::sv_prioritize::run_sv_prioritize(
        &cli_settings.input_vcf,
        &cli_settings.output_vcf,
        &prioritizer
    ) {
        error!("Error while prioritizing structural variants: {e}");
        std::process::exit(workflow_exit_code(e.as_ref()));
    }
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::SmlvFilter(settings) => {
            run_smlv_filter(*settings);
        },
        Commands::SmlvSelect(settings) => {
            run_smlv_select(*settings);
        },
        Commands::SvPrioritize(settings) => {
            run_sv_prioritize(*settings);
        }
    }

    info!("Process finished successfully.");
}
