
use log::trace;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::path::Path;

use crate::util::file_io::load_delimited_rows;

/// Expected number of columns: gene, gene id, transcript id, CCDS id, label
const APPRIS_COLUMNS: usize = 5;

/// Principal and alternative transcripts for each gene according to APPRIS.
/// Genes are keyed by gene id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TranscriptTable {
    /// gene id -> [principal, alternates...]; only genes with a principal transcript are present
    all_transcripts: HashMap<String, Vec<String>>
}

impl TranscriptTable {
    /// Loads the tab-delimited APPRIS table. Rows that do not have exactly five columns are skipped.
    /// When a gene has more than one PRINCIPAL row, the last one wins.
    /// # Arguments
    /// * `filename` - the APPRIS annotation table
    /// # Errors
    /// * if the file cannot be opened or read
    pub fn from_file(filename: &Path) -> Result<TranscriptTable, Box<dyn std::error::Error>> {
        let mut principal: HashMap<String, String> = Default::default();
        let mut alternates: HashMap<String, Vec<String>> = Default::default();

        for row in load_delimited_rows(filename, b'\t')? {
            if row.len() != APPRIS_COLUMNS {
                trace!("Skipping APPRIS row with {} columns: {row:?}", row.len());
                continue;
            }
            let gene_id = row[1].trim();
            let transcript_id = row[2].trim();
            let label = row[4].trim();
            if gene_id.is_empty() || transcript_id.is_empty() {
                trace!("Skipping APPRIS row with empty fields: {row:?}");
                continue;
            }

            if label.contains("PRINCIPAL") {
                principal.insert(gene_id.to_string(), transcript_id.to_string());
            } else if label.contains("ALTERNATIVE") {
                alternates.entry(gene_id.to_string())
                    .or_default()
                    .push(transcript_id.to_string());
            }
        }

        let all_transcripts: HashMap<String, Vec<String>> = principal.into_iter()
            .map(|(gene_id, transcript_id)| {
                let mut transcripts = vec![transcript_id];
                if let Some(alts) = alternates.remove(&gene_id) {
                    transcripts.extend(alts);
                }
                (gene_id, transcripts)
            })
            .collect();

        Ok(TranscriptTable {
            all_transcripts
        })
    }

    /// All principal and alternative transcripts across genes
    pub fn transcript_set(&self) -> HashSet<String> {
        self.all_transcripts.values()
            .flat_map(|v| v.iter().cloned())
            .collect()
    }

    pub fn num_genes(&self) -> usize {
        self.all_transcripts.len()
    }
}
