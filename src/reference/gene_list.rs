
use log::trace;
use rustc_hash::FxHashSet as HashSet;
use std::path::Path;

use crate::util::file_io::load_file_lines;

/// An immutable set of gene symbols, e.g. key cancer genes or tumor suppressors
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GeneSet {
    genes: HashSet<String>
}

impl GeneSet {
    /// Loads a one-gene-per-line file. Lines with more than one comma-separated field are skipped.
    /// # Arguments
    /// * `filename` - the gene list to load, may be gzipped
    /// # Errors
    /// * if the file cannot be opened or read
    pub fn from_file(filename: &Path) -> Result<GeneSet, Box<dyn std::error::Error>> {
        let mut genes: HashSet<String> = Default::default();
        for line in load_file_lines(filename)? {
            let fields: Vec<&str> = line.split(',').map(|s| s.trim()).collect();
            if fields.len() == 1 && !fields[0].is_empty() {
                genes.insert(fields[0].to_string());
            } else {
                trace!("Skipping gene list line in {filename:?}: {line:?}");
            }
        }
        Ok(GeneSet { genes })
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.genes.contains(gene)
    }

    /// Returns true if any of the provided genes are in this set
    pub fn contains_any<'a, I: IntoIterator<Item = &'a String>>(&self, genes: I) -> bool {
        genes.into_iter().any(|g| self.genes.contains(g))
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        GeneSet {
            genes: iter.into_iter().map(|s| s.into()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_gene_list() {
        let genes = GeneSet::from_file(Path::new("test_data/reference/key_genes.txt")).unwrap();
        assert_eq!(genes.len(), 6);
        assert!(genes.contains("ALK"));
        assert!(genes.contains("TP53"));
        // the pair line is skipped
        assert!(!genes.contains("FOO"));
        assert!(!genes.contains("FOO,BAR"));
    }

    #[test]
    fn test_contains_any() {
        let genes: GeneSet = ["TP53", "PTEN"].into_iter().collect();
        let query = vec!["BRCA2".to_string(), "PTEN".to_string()];
        assert!(genes.contains_any(&query));
        let query = vec!["BRCA2".to_string()];
        assert!(!genes.contains_any(&query));
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let genes_fn = tmp_dir.path().join("genes.txt");
        std::fs::write(&genes_fn, b"TP53\n\xffPTEN\nBRCA2\n").unwrap();
        let genes = GeneSet::from_file(&genes_fn).unwrap();
        assert_eq!(genes.len(), 2);
        assert!(genes.contains("TP53"));
        assert!(genes.contains("BRCA2"));
    }
}
