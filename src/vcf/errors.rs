
/// Problems with the content of an input VCF that stop the run
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("VCF does not contain any samples")]
    NoSamples,
    #[error("sample \"{name}\" was not found in VCF samples: {samples:?}")]
    UnknownSample { name: String, samples: Vec<String> },
    #[error("record {record} is missing FORMAT/{tag} for sample {sample}")]
    MissingFormat { record: String, tag: String, sample: String },
    #[error("could not parse {field} in record {record}: {reason}")]
    UnparseableField { record: String, field: String, reason: String }
}
