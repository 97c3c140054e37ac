use std::collections::VecDeque;

use anyhow::Result;
use indexmap::{IndexMap, IndexSet};
use multimap::MultiMap;

use crate::model::denovo::{DenovoVariant, HetSite};
use crate::reads::site_search::sites_spanned_by;
use crate::sources::alignment_source::{
    mates_overlap, pair_allele_at, AlignmentSource, ReadRecord,
};

/// Read-pairs fetched per heterozygous site for extended grouping.
pub const EXTENDED_RB_READ_GOAL: usize = 100;

/// Seed reads injected with this sentinel position have no site of origin.
const SEED_POS: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Haplotype {
    Alt,
    Ref,
}

impl Haplotype {
    fn other(self) -> Haplotype {
        match self {
            Haplotype::Alt => Haplotype::Ref,
            Haplotype::Ref => Haplotype::Alt,
        }
    }
}

/// The two child haplotypes as read lists: `alt` is the haplotype carrying
/// the de novo, `ref_reads` the other. Each assigned pair contributes read
/// then mate, in first-fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedReads {
    pub alt: Vec<ReadRecord>,
    pub ref_reads: Vec<ReadRecord>,
}

/**
 * Partition reads around a de novo into its two parental haplotypes.
 *
 * Reads directly supporting the de novo seed the `alt` haplotype. Read-pairs
 * fetched at the de novo's heterozygous sites are then linked transitively:
 * a pair observing the same allele as an already assigned pair at a shared
 * site joins its haplotype, a pair observing the other allele joins the
 * opposite one. Assignment is first-wins and the closure runs over an
 * explicit work queue, so each pair is processed at most once and the
 * result is deterministic for a fixed fetch order.
 */
pub fn group_reads_by_haplotype<A: AlignmentSource>(
    source: &mut A,
    denovo: &DenovoVariant,
    seed_alt: &[ReadRecord],
    het_sites: &[HetSite],
) -> Result<GroupedReads> {
    let mut fetched: IndexMap<String, (ReadRecord, ReadRecord)> = IndexMap::new();
    let mut read_sites: MultiMap<String, HetSite> = MultiMap::new();
    let mut site_reads: MultiMap<i64, String> = MultiMap::new();

    for site in het_sites {
        let reads = source.fetch(&denovo.chrom, site.pos, site.pos + 1)?;
        for read in reads.into_iter().take(EXTENDED_RB_READ_GOAL) {
            if !read.is_good() {
                continue;
            }
            let mate = match source.mate(&read) {
                Some(mate) => mate,
                None => continue,
            };
            if !mate.is_good() || mates_overlap(&read, &mate) {
                continue;
            }
            let name = read.query_name.clone();
            read_sites.insert(name.clone(), site.clone());
            site_reads.insert(site.pos, name.clone());
            fetched.insert(name, (read, mate));
        }
    }

    let mut alt_names: IndexSet<String> = IndexSet::new();
    let mut ref_names: IndexSet<String> = IndexSet::new();
    let mut queue: VecDeque<(String, i64, Haplotype)> = VecDeque::new();

    for seed in seed_alt {
        let name = seed.query_name.clone();
        alt_names.insert(name.clone());
        queue.push_back((name.clone(), SEED_POS, Haplotype::Alt));
        let mate = match source.mate(seed) {
            Some(mate) => mate,
            None => continue,
        };
        fetched.insert(name.clone(), (seed.clone(), mate));
        for site in sites_spanned_by(seed.reference_start, seed.reference_end, het_sites) {
            read_sites.insert(name.clone(), site.clone());
            site_reads.insert(site.pos, name.clone());
        }
    }

    while let Some((name, found_pos, haplotype)) = queue.pop_front() {
        // seeds that overlap no heterozygous site bridge nothing
        let sites = match read_sites.get_vec(&name) {
            Some(sites) => sites,
            None => continue,
        };
        let (read, mate) = match fetched.get(&name) {
            Some(pair) => pair,
            None => continue,
        };
        for site in sites {
            if site.pos == found_pos {
                continue;
            }
            let finder_allele = match pair_allele_at(read, Some(mate), site.pos) {
                Some(allele) => allele,
                None => continue,
            };
            let (ref_base, alt_base) = match (
                site.ref_allele.as_bytes().first(),
                site.alt_allele.as_bytes().first(),
            ) {
                (Some(&r), Some(&a)) => (r, a),
                _ => continue,
            };
            let non_finder_allele = if finder_allele == ref_base {
                alt_base
            } else if finder_allele == alt_base {
                ref_base
            } else {
                continue;
            };
            let names_here = match site_reads.get_vec(&site.pos) {
                Some(names) => names,
                None => continue,
            };
            for other in names_here {
                if alt_names.contains(other) || ref_names.contains(other) {
                    continue;
                }
                let (other_read, other_mate) = match fetched.get(other) {
                    Some(pair) => pair,
                    None => continue,
                };
                let allele = match pair_allele_at(other_read, Some(other_mate), site.pos) {
                    Some(allele) => allele,
                    None => continue,
                };
                let assigned = if allele == finder_allele {
                    haplotype
                } else if allele == non_finder_allele {
                    haplotype.other()
                } else {
                    continue;
                };
                match assigned {
                    Haplotype::Alt => alt_names.insert(other.clone()),
                    Haplotype::Ref => ref_names.insert(other.clone()),
                };
                queue.push_back((other.clone(), site.pos, assigned));
            }
        }
    }

    let mut grouped = GroupedReads::default();
    for (name, (read, mate)) in &fetched {
        if alt_names.contains(name) {
            grouped.alt.push(read.clone());
            grouped.alt.push(mate.clone());
        } else if ref_names.contains(name) {
            grouped.ref_reads.push(read.clone());
            grouped.ref_reads.push(mate.clone());
        }
    }
    Ok(grouped)
}
