
use log::trace;
use rustc_hash::FxHashSet as HashSet;
use std::path::Path;

use crate::util::file_io::load_delimited_rows;

/// Header tokens in the HMF fusion files
const PAIRS_HEADER_TOKEN: &str = "H_gene";
const PROMISCUOUS_HEADER_TOKEN: &str = "gene";

/// Known fusion partners and promiscuous fusion genes
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FusionKnowledgeBase {
    /// Known pairs stored in lexical order so that lookups are orientation-free
    known_pairs: HashSet<(String, String)>,
    /// Genes that are known to fuse with many partners, 5' and 3' lists combined
    promiscuous: HashSet<String>
}

impl FusionKnowledgeBase {
    /// Constructor from pre-loaded sets
    pub fn new(known_pairs: HashSet<(String, String)>, promiscuous: HashSet<String>) -> Self {
        Self {
            known_pairs: known_pairs.into_iter().map(|(g1, g2)| ordered_pair(g1, g2)).collect(),
            promiscuous
        }
    }

    /// Loads the known pairs CSV and the two promiscuous gene CSVs.
    /// Malformed, empty, or non-UTF-8 rows are skipped.
    /// # Arguments
    /// * `pairs_fn` - CSV with the two partner genes in the first two columns
    /// * `five_fn` - CSV of promiscuous 5' genes in the first column
    /// * `three_fn` - CSV of promiscuous 3' genes in the first column
    /// # Errors
    /// * if any file cannot be opened or read
    pub fn from_files(pairs_fn: &Path, five_fn: &Path, three_fn: &Path) -> Result<FusionKnowledgeBase, Box<dyn std::error::Error>> {
        let mut known_pairs: HashSet<(String, String)> = Default::default();
        for row in load_delimited_rows(pairs_fn, b',')? {
            let g1 = clean_field(row.get(0));
            let g2 = clean_field(row.get(1));
            if g1.is_empty() || g2.is_empty() || g1 == PAIRS_HEADER_TOKEN {
                trace!("Skipping fusion pair row in {pairs_fn:?}: {row:?}");
                continue;
            }
            known_pairs.insert(ordered_pair(g1, g2));
        }

        let mut promiscuous: HashSet<String> = Default::default();
        for filename in [five_fn, three_fn] {
            for row in load_delimited_rows(filename, b',')? {
                let gene = clean_field(row.get(0));
                if gene.is_empty() || gene == PROMISCUOUS_HEADER_TOKEN {
                    trace!("Skipping promiscuous gene row in {filename:?}: {row:?}");
                    continue;
                }
                promiscuous.insert(gene);
            }
        }

        Ok(FusionKnowledgeBase {
            known_pairs, promiscuous
        })
    }

    /// Returns true if the two genes are a known pair in either orientation
    pub fn is_known_pair(&self, g1: &str, g2: &str) -> bool {
        self.known_pairs.contains(&ordered_pair(g1.to_string(), g2.to_string()))
    }

    pub fn is_promiscuous(&self, gene: &str) -> bool {
        self.promiscuous.contains(gene)
    }

    pub fn num_known_pairs(&self) -> usize {
        self.known_pairs.len()
    }

    pub fn num_promiscuous(&self) -> usize {
        self.promiscuous.len()
    }
}

fn ordered_pair(g1: String, g2: String) -> (String, String) {
    if g1 <= g2 {
        (g1, g2)
    } else {
        (g2, g1)
    }
}

/// Trims whitespace and any stray quotes from a CSV field
fn clean_field(field: Option<&str>) -> String {
    field.unwrap_or_default().replace('"', "").trim().to_string()
}
