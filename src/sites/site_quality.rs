use crate::config::Tunables;
use crate::model::genotype::Genotype;
use crate::sources::variant_source::VariantRecord;

/// Whether sample `i`'s call at this site is confident enough to phase
/// against: a called genotype, sufficient genotype quality and depth, and an
/// allele balance inside the band expected for that genotype.
pub fn is_high_quality_site(i: usize, rec: &VariantRecord, tunables: &Tunables) -> bool {
    let (min_ab, max_ab) = match rec.genotypes[i] {
        Genotype::HomRef => tunables.ab_homref,
        Genotype::HomAlt => tunables.ab_homalt,
        Genotype::Het => tunables.ab_het,
        Genotype::Unknown => return false,
    };
    if rec.gt_quals[i] < tunables.min_gt_qual {
        return false;
    }
    let depth = rec.ref_depths[i] + rec.alt_depths[i];
    if depth < tunables.min_depth || depth <= 0 {
        return false;
    }
    let allele_bal = rec.alt_depths[i] as f64 / depth as f64;
    min_ab <= allele_bal && allele_bal <= max_ab
}
