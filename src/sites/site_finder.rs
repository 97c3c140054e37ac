use anyhow::Result;

use crate::config::Tunables;
use crate::model::denovo::DenovoVariant;
use crate::model::pedigree::Pedigree;
use crate::sites::auto_phaser::autophaseable;
use crate::sites::batch_finder::BatchFinder;
use crate::sites::variant_eval::{evaluate_variant, is_complex_variant, TrioContext};
use crate::sources::variant_source::VariantSource;

/// Informative-site scan over a variant callset.
///
/// Each de novo is annotated in place with the candidate sites usable for
/// direct parental assignment and the heterozygous sites usable as bridges
/// in extended read-backed phasing. With enough de novos the work is handed
/// to [`BatchFinder`], which shares one linear callset scan per chromosome.
pub struct SiteFinder<'a> {
    pedigree: &'a Pedigree,
    tunables: &'a Tunables,
}

impl<'a> SiteFinder<'a> {
    pub fn new(pedigree: &'a Pedigree, tunables: &'a Tunables) -> SiteFinder<'a> {
        SiteFinder { pedigree, tunables }
    }

    /// Annotate every de novo, choosing between the per-variant and batched
    /// scan by input size. `open_source` is invoked once here, or once per
    /// chromosome worker in the batched scan.
    pub fn find<V, F>(&self, dnms: Vec<DenovoVariant>, open_source: F) -> Result<Vec<DenovoVariant>>
    where
        V: VariantSource,
        F: Fn() -> Result<V> + Sync,
    {
        if dnms.is_empty() {
            return Ok(dnms);
        }
        if dnms.len() >= self.tunables.multithread_proc_min {
            BatchFinder::new(self.pedigree, self.tunables).find(dnms, open_source)
        } else {
            let mut source = open_source()?;
            self.find_each(dnms, &mut source)
        }
    }

    /// Per-variant scan: query windows around each de novo independently.
    /// Output preserves input order.
    pub fn find_each<V: VariantSource>(
        &self,
        mut dnms: Vec<DenovoVariant>,
        source: &mut V,
    ) -> Result<Vec<DenovoVariant>> {
        for denovo in dnms.iter_mut() {
            if autophaseable(denovo, self.pedigree, self.tunables.build) {
                continue;
            }
            let trio = match TrioContext::resolve(
                &denovo.kid_id,
                self.pedigree,
                source.samples(),
                self.tunables.quiet_mode,
            ) {
                Some(trio) => trio,
                None => continue,
            };
            denovo.candidate_sites.clear();
            denovo.het_sites.clear();
            let chrom = denovo.chrom.clone();
            for (start, end) in search_windows(denovo, self.tunables) {
                for res in source.query(&chrom, start, end)? {
                    let rec = res?;
                    if is_complex_variant(&rec) {
                        continue;
                    }
                    evaluate_variant(denovo, &trio, &rec, self.tunables);
                }
            }
            denovo.candidate_sites.sort_by_key(|c| c.pos);
            denovo.het_sites.sort_by_key(|h| h.pos);
        }
        Ok(dnms)
    }
}

/// Query windows around a de novo. Whole-region mode spans the breakpoints;
/// otherwise each breakpoint gets its own window, the second clamped so a
/// variant between overlapping windows is only seen once.
fn search_windows(denovo: &DenovoVariant, tunables: &Tunables) -> Vec<(i64, i64)> {
    let dist = tunables.search_dist;
    if tunables.whole_region {
        vec![((denovo.start - dist).max(0), denovo.end + dist)]
    } else {
        let mut windows = vec![((denovo.start - dist).max(0), denovo.start + dist)];
        if denovo.end - denovo.start > dist {
            windows.push((
                (denovo.end - dist).max(denovo.start + dist + 1),
                denovo.end + dist,
            ));
        }
        windows
    }
}
