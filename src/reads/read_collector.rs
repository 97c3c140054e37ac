use anyhow::Result;

use crate::model::denovo::{DenovoVariant, HetSite};
use crate::reads::grouper::{group_reads_by_haplotype, GroupedReads};
use crate::reads::insert_estimator::estimate_concordant_insert_len;
use crate::reads::sv_support::collect_sv_supporting_reads;
use crate::sources::alignment_source::{pair_allele_at, AlignmentSource};

/// Read-pairs with more clipped or inserted bases than this are too messy
/// to type an allele from.
pub const MAX_GAP_MARKERS: usize = 5;

/// Collect the reads phasing a point or indel de novo: pairs covering the
/// variant position are seeded into `alt` or `ref_reads` by the allele they
/// carry, then extended through the heterozygous bridge sites unless
/// `no_extended`.
pub fn collect_reads_snv<A: AlignmentSource>(
    source: &mut A,
    denovo: &DenovoVariant,
    het_sites: &[HetSite],
    ref_allele: &str,
    alt_allele: &str,
    no_extended: bool,
) -> Result<GroupedReads> {
    let position = denovo.start;
    let mut grouped = GroupedReads::default();
    let reads = source.fetch(&denovo.chrom, (position - 1).max(0), position + 1)?;
    for read in reads {
        if !read.is_good() {
            continue;
        }
        let mate = match source.mate(&read) {
            Some(mate) => mate,
            None => continue,
        };
        if !mate.is_good() {
            continue;
        }
        if read.gap_marker_count() > MAX_GAP_MARKERS || mate.gap_marker_count() > MAX_GAP_MARKERS {
            continue;
        }
        let allele = match pair_allele_at(&read, Some(&mate), position) {
            Some(allele) => allele,
            None => continue,
        };
        if ref_allele.len() == 1 && allele == ref_allele.as_bytes()[0] {
            grouped.ref_reads.push(read);
            grouped.ref_reads.push(mate);
        } else if alt_allele.len() == 1 && allele == alt_allele.as_bytes()[0] {
            grouped.alt.push(read);
            grouped.alt.push(mate);
        }
    }

    if no_extended {
        return Ok(grouped);
    }
    let seeds = grouped.alt.clone();
    group_reads_by_haplotype(source, denovo, &seeds, het_sites)
}

/// Collect the reads phasing a structural de novo: breakpoint-supporting
/// pairs seed `alt`, then extension as for SNVs. The concordant insert
/// bound is estimated from the source when not supplied.
pub fn collect_reads_sv<A: AlignmentSource>(
    source: &mut A,
    denovo: &DenovoVariant,
    het_sites: &[HetSite],
    concordant_upper_len: Option<f64>,
    no_extended: bool,
) -> Result<GroupedReads> {
    let bound = match concordant_upper_len {
        Some(bound) => bound,
        None => estimate_concordant_insert_len(source)?,
    };
    let supporting = collect_sv_supporting_reads(source, denovo, bound)?;
    if no_extended {
        return Ok(GroupedReads {
            alt: supporting,
            ref_reads: Vec::new(),
        });
    }
    group_reads_by_haplotype(source, denovo, &supporting, het_sites)
}
