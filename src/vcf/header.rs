
use log::debug;
use rust_htslib::bcf::header::{Header, HeaderView};
use rust_htslib::bcf::HeaderRecord;
use rustc_hash::FxHashSet as HashSet;

use crate::data_types::vcf_symbols::{HeaderDefinition, HeaderNamespace};

/// Collects the IDs declared in one section of a header.
/// FILTER and INFO share the htslib ID dictionary, so membership has to be checked per section.
/// # Arguments
/// * `header` - the header to scan
/// * `namespace` - the section to collect
pub fn declared_ids(header: &HeaderView, namespace: HeaderNamespace) -> HashSet<String> {
    let mut ids: HashSet<String> = Default::default();
    for header_record in header.header_records() {
        let values = match (namespace, header_record) {
            (HeaderNamespace::Filter, HeaderRecord::Filter { values, .. }) |
            (HeaderNamespace::Info, HeaderRecord::Info { values, .. }) |
            (HeaderNamespace::Format, HeaderRecord::Format { values, .. }) => values,
            _ => continue
        };
        if let Some(id) = values.get("ID") {
            ids.insert(id.clone());
        }
    }
    ids
}

/// Builds the output header from an input header.
/// Every definition whose ID is not already declared in its section is appended, existing declarations are left alone.
/// The tool version and command line are recorded as well.
/// # Arguments
/// * `input_header` - the header of the VCF being annotated
/// * `definitions` - the symbols the output may contain
pub fn build_output_header(input_header: &HeaderView, definitions: &[HeaderDefinition]) -> Header {
    let mut header = Header::from_template(input_header);

    let mut declared = [HeaderNamespace::Filter, HeaderNamespace::Info, HeaderNamespace::Format]
        .map(|namespace| (namespace, declared_ids(input_header, namespace)));
    for definition in definitions.iter() {
        let Some((_, ids)) = declared.iter_mut().find(|(namespace, _)| *namespace == definition.namespace()) else {
            continue;
        };
        if ids.insert(definition.id().to_string()) {
            debug!("Registering {}/{} in output header", definition.namespace(), definition.id());
            header.push_record(definition.header_line().as_bytes());
        }
    }

    let ver: &str = crate::cli::core::FULL_VERSION.as_str();
    let cli_version = format!("\"{ver}\"");
    let cli_string = format!("\"{}\"", std::env::args().collect::<Vec<String>>().join(" "));
    header.push_record(format!("##oncotier_version={cli_version}").as_bytes());
    header.push_record(format!("##oncotier_command={cli_string}").as_bytes());

    header
}
