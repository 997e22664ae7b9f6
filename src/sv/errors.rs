
/// Violations of the annotation contract with the upstream annotator, these stop the run
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SvAnnotationError {
    #[error("annotation entry has {count} distinct transcript ids, expected at most one: {entry}")]
    MultipleTranscriptIds { count: usize, entry: String },
    #[error("malformed transcript id \"{transcript_id}\" in annotation entry: {entry}")]
    MalformedTranscriptId { transcript_id: String, entry: String },
    #[error("exon loss annotation has {count} genes, expected exactly one: {entry}")]
    ExonLossGeneCount { count: usize, entry: String }
}
