
/// Loads the APPRIS principal/alternative transcript table
pub mod appris;
/// Loads known fusion pairs and promiscuous fusion genes
pub mod fusions;
/// Loads flat gene lists
pub mod gene_list;
/// Loads padded gene intervals from BED
pub mod gene_regions;

use log::info;
use rustc_hash::FxHashSet as HashSet;
use std::path::Path;

use crate::reference::appris::TranscriptTable;
use crate::reference::fusions::FusionKnowledgeBase;
use crate::reference::gene_list::GeneSet;

/// Everything the SV prioritization reads, loaded once per run
#[derive(Clone, Debug, Default)]
pub struct SvReferenceData {
    /// Key cancer genes
    priority_genes: GeneSet,
    /// Key tumor suppressor genes
    tumor_suppressors: GeneSet,
    /// Known fusion pairs and promiscuous genes
    fusions: FusionKnowledgeBase,
    /// Every principal and alternative transcript id from APPRIS
    known_transcripts: HashSet<String>
}

/// File locations for all the SV reference data
pub struct SvReferencePaths<'a> {
    pub key_genes: &'a Path,
    pub key_tsgenes: &'a Path,
    pub known_fusion_pairs: &'a Path,
    pub known_fusion_five: &'a Path,
    pub known_fusion_three: &'a Path,
    pub appris: &'a Path
}

impl SvReferenceData {
    /// Constructor from pre-loaded parts
    pub fn new(priority_genes: GeneSet, tumor_suppressors: GeneSet, fusions: FusionKnowledgeBase, known_transcripts: HashSet<String>) -> Self {
        Self {
            priority_genes, tumor_suppressors, fusions, known_transcripts
        }
    }

    /// Loads all of the reference files
    /// # Arguments
    /// * `paths` - the reference file locations
    /// # Errors
    /// * if any of the files cannot be opened or read
    pub fn load(paths: &SvReferencePaths) -> Result<SvReferenceData, Box<dyn std::error::Error>> {
        info!("Loading key genes from {:?}...", paths.key_genes);
        let priority_genes = GeneSet::from_file(paths.key_genes)?;
        info!("\tLoaded {} key genes.", priority_genes.len());

        info!("Loading key tumor suppressor genes from {:?}...", paths.key_tsgenes);
        let tumor_suppressors = GeneSet::from_file(paths.key_tsgenes)?;
        info!("\tLoaded {} tumor suppressor genes.", tumor_suppressors.len());

        info!("Loading known fusions from {:?}...", paths.known_fusion_pairs);
        let fusions = FusionKnowledgeBase::from_files(paths.known_fusion_pairs, paths.known_fusion_five, paths.known_fusion_three)?;
        info!("\tLoaded {} known pairs and {} promiscuous genes.", fusions.num_known_pairs(), fusions.num_promiscuous());

        info!("Loading APPRIS transcripts from {:?}...", paths.appris);
        let transcript_table = TranscriptTable::from_file(paths.appris)?;
        let known_transcripts = transcript_table.transcript_set();
        info!("\tLoaded {} transcripts for {} genes.", known_transcripts.len(), transcript_table.num_genes());

        Ok(SvReferenceData {
            priority_genes,
            tumor_suppressors,
            fusions,
            known_transcripts
        })
    }

    pub fn priority_genes(&self) -> &GeneSet {
        &self.priority_genes
    }

    pub fn tumor_suppressors(&self) -> &GeneSet {
        &self.tumor_suppressors
    }

    pub fn fusions(&self) -> &FusionKnowledgeBase {
        &self.fusions
    }

    pub fn known_transcripts(&self) -> &HashSet<String> {
        &self.known_transcripts
    }
}
