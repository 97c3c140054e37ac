use std::path::PathBuf;

/// Reference genome build, used to select the pseudoautosomal region tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceBuild {
    Grch37,
    Grch38,
}

impl ReferenceBuild {
    pub fn from_name(name: &str) -> Option<ReferenceBuild> {
        match name.to_ascii_lowercase().as_str() {
            "37" | "grch37" | "hg19" => Some(ReferenceBuild::Grch37),
            "38" | "grch38" | "hg38" => Some(ReferenceBuild::Grch38),
            _ => None,
        }
    }
}

/// Run-wide settings, fixed before phasing starts and passed by reference
/// through the call graph.
///
/// Allele-balance bands are `(min, max)` inclusive and are selected by the
/// genotype of the sample under test.
#[derive(Debug, Clone)]
pub struct Tunables {
    /// Bases upstream and downstream of a de novo variant to search for
    /// informative sites.
    pub search_dist: i64,
    /// Per-chromosome workers for the batched scan. 1 runs sequentially on
    /// the caller thread.
    pub threads: usize,
    /// `None` when the build is unrecognized; sex-chromosome auto-phasing is
    /// then disabled and variants fall through to the normal search.
    pub build: Option<ReferenceBuild>,
    /// Number of de novo variants at which the batched, chromosome-parallel
    /// scan takes over from the per-variant scan.
    pub multithread_proc_min: usize,
    /// Suppress warnings about samples missing from the callset.
    pub quiet_mode: bool,
    /// Search the whole span between breakpoints (structural variants)
    /// instead of windows around each breakpoint.
    pub whole_region: bool,
    pub ab_homref: (f64, f64),
    pub ab_het: (f64, f64),
    pub ab_homalt: (f64, f64),
    pub min_gt_qual: f32,
    pub min_depth: i32,
    /// Reference FASTA for CRAM decoding.
    pub cram_ref: Option<PathBuf>,
    /// Skip extended read-backed haplotype grouping and report only reads
    /// directly supporting the variant.
    pub no_extended: bool,
}

impl Default for Tunables {
    fn default() -> Tunables {
        Tunables {
            search_dist: 5000,
            threads: 2,
            build: Some(ReferenceBuild::Grch38),
            multithread_proc_min: 10,
            quiet_mode: false,
            whole_region: false,
            ab_homref: (0.0, 0.2),
            ab_het: (0.25, 0.75),
            ab_homalt: (0.8, 1.0),
            min_gt_qual: 20.0,
            min_depth: 10,
            cram_ref: None,
            no_extended: false,
        }
    }
}
