use crate::model::denovo::HetSite;

/// Heterozygous sites with position inside `[start, end]`, by binary search.
/// `het_sites` must be sorted by position.
pub fn sites_spanned_by(start: i64, end: i64, het_sites: &[HetSite]) -> &[HetSite] {
    let lo = het_sites.partition_point(|site| site.pos < start);
    let hi = het_sites.partition_point(|site| site.pos <= end);
    &het_sites[lo..hi]
}
