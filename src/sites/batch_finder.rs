use std::collections::BTreeMap;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::config::Tunables;
use crate::model::denovo::DenovoVariant;
use crate::model::pedigree::Pedigree;
use crate::sites::auto_phaser::autophaseable;
use crate::sites::variant_eval::{evaluate_variant, is_complex_variant, TrioContext};
use crate::sources::variant_source::VariantSource;

/// De novos of one chromosome plus the position index used for proximity
/// lookups during the shared scan. Breakpoint positions key lists of
/// indices into `dnms`; `start` is always keyed, `end` additionally for
/// events longer than 2 bases.
struct ChromBatch {
    chrom: String,
    dnms: Vec<DenovoVariant>,
    loc_index: BTreeMap<i64, Vec<usize>>,
    range: (i64, i64),
}

/// Informative-site scan that serves many de novos per chromosome from one
/// linear pass over the callset.
///
/// Chromosomes are processed by independent workers, each with its own
/// reader handle and exclusive ownership of that chromosome's de novos;
/// annotated batches are merged after the join. Output order is documented:
/// chromosomes in first-appearance order of the input, input order within a
/// chromosome, auto-phaseable de novos (untouched) last.
pub struct BatchFinder<'a> {
    pedigree: &'a Pedigree,
    tunables: &'a Tunables,
}

impl<'a> BatchFinder<'a> {
    pub fn new(pedigree: &'a Pedigree, tunables: &'a Tunables) -> BatchFinder<'a> {
        BatchFinder { pedigree, tunables }
    }

    pub fn find<V, F>(&self, dnms: Vec<DenovoVariant>, open_source: F) -> Result<Vec<DenovoVariant>>
    where
        V: VariantSource,
        F: Fn() -> Result<V> + Sync,
    {
        let (mut batches, autophased) = self.build_batches(dnms);

        if self.tunables.threads == 1 {
            for batch in batches.iter_mut() {
                self.scan_chromosome(batch, &open_source)?;
            }
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.tunables.threads)
                .build()
                .context("unable to build chromosome worker pool")?;
            pool.install(|| {
                batches
                    .par_iter_mut()
                    .map(|batch| self.scan_chromosome(batch, &open_source))
                    .collect::<Result<Vec<_>>>()
            })?;
        }

        let mut annotated: Vec<DenovoVariant> =
            batches.into_iter().flat_map(|batch| batch.dnms).collect();
        annotated.extend(autophased);
        Ok(annotated)
    }

    fn build_batches(&self, dnms: Vec<DenovoVariant>) -> (Vec<ChromBatch>, Vec<DenovoVariant>) {
        let mut autophased = Vec::new();
        let mut batches: IndexMap<String, ChromBatch> = IndexMap::new();
        for denovo in dnms {
            if autophaseable(&denovo, self.pedigree, self.tunables.build) {
                autophased.push(denovo);
                continue;
            }
            let chrom = denovo.chrom.clone();
            let batch = batches.entry(chrom.clone()).or_insert_with(|| ChromBatch {
                chrom,
                dnms: Vec::new(),
                loc_index: BTreeMap::new(),
                range: (i64::MAX, i64::MIN),
            });
            let idx = batch.dnms.len();
            batch.loc_index.entry(denovo.start).or_default().push(idx);
            if denovo.end - denovo.start > 2 {
                batch.loc_index.entry(denovo.end).or_default().push(idx);
            }
            batch.range.0 = batch.range.0.min(denovo.start);
            batch.range.1 = batch.range.1.max(denovo.end);
            batch.dnms.push(denovo);
        }
        (batches.into_iter().map(|(_, batch)| batch).collect(), autophased)
    }

    fn scan_chromosome<V, F>(&self, batch: &mut ChromBatch, open_source: &F) -> Result<()>
    where
        V: VariantSource,
        F: Fn() -> Result<V>,
    {
        let mut source = open_source()?;
        debug!(
            "scanning {} for informative sites across {} de novo variants",
            batch.chrom,
            batch.dnms.len()
        );
        let trios: Vec<Option<TrioContext>> = batch
            .dnms
            .iter()
            .map(|denovo| {
                TrioContext::resolve(
                    &denovo.kid_id,
                    self.pedigree,
                    source.samples(),
                    self.tunables.quiet_mode,
                )
            })
            .collect();
        for (denovo, trio) in batch.dnms.iter_mut().zip(&trios) {
            if trio.is_some() {
                denovo.candidate_sites.clear();
                denovo.het_sites.clear();
            }
        }

        let dist = self.tunables.search_dist;
        let (lo, hi) = ((batch.range.0 - dist).max(0), batch.range.1 + dist);
        for res in source.query(&batch.chrom, lo, hi)? {
            let rec = res?;
            if is_complex_variant(&rec) {
                continue;
            }
            for idx in close_denovo_indices(
                &batch.loc_index,
                &batch.dnms,
                rec.pos,
                dist,
                self.tunables.whole_region,
            ) {
                if let Some(trio) = &trios[idx] {
                    evaluate_variant(&mut batch.dnms[idx], trio, &rec, self.tunables);
                }
            }
        }

        for denovo in batch.dnms.iter_mut() {
            denovo.candidate_sites.sort_by_key(|c| c.pos);
            denovo.het_sites.sort_by_key(|h| h.pos);
        }
        Ok(())
    }
}

/// De novos within reach of a variant position, each reported once even
/// when both of its breakpoints are indexed nearby.
fn close_denovo_indices(
    loc_index: &BTreeMap<i64, Vec<usize>>,
    dnms: &[DenovoVariant],
    pos: i64,
    search_dist: i64,
    whole_region: bool,
) -> Vec<usize> {
    let hits: Vec<usize> = if whole_region {
        loc_index
            .values()
            .flatten()
            .copied()
            .filter(|&idx| {
                let denovo = &dnms[idx];
                denovo.start - search_dist <= pos && pos <= denovo.end + search_dist
            })
            .collect()
    } else {
        loc_index
            .range(pos - search_dist..=pos + search_dist)
            .flat_map(|(_, idxs)| idxs.iter().copied())
            .collect()
    };
    hits.into_iter().sorted().dedup().collect()
}
