use log::warn;

use crate::config::Tunables;
use crate::model::denovo::{CandidateSite, DenovoVariant, HetSite, KidAllele, VariantKind};
use crate::model::genotype::Genotype;
use crate::model::pedigree::{Pedigree, Sex};
use crate::sites::parent_assignment::{assign_alt_parent, hemizygous_kid_allele_unique, Parent};
use crate::sites::site_quality::is_high_quality_site;
use crate::sources::variant_source::{strip_chr_prefix, VariantRecord};

/// Resolved sample indices for one trio within a variant source.
#[derive(Debug, Clone)]
pub(crate) struct TrioContext {
    pub kid: usize,
    pub dad: usize,
    pub mom: usize,
    pub dad_id: String,
    pub mom_id: String,
    pub kid_is_male: bool,
}

impl TrioContext {
    /// Look the trio up in the source's sample list, warning (unless quiet)
    /// about any member missing from the callset.
    pub(crate) fn resolve(
        kid_id: &str,
        pedigree: &Pedigree,
        samples: &[String],
        quiet: bool,
    ) -> Option<TrioContext> {
        let family = match pedigree.family(kid_id) {
            Some(family) => family,
            None => {
                if !quiet {
                    warn!("{} missing from pedigree", kid_id);
                }
                return None;
            }
        };
        let mut missing = false;
        for sample_id in [kid_id, family.dad.as_str(), family.mom.as_str()] {
            if !samples.iter().any(|s| s.as_str() == sample_id) {
                if !quiet {
                    warn!("{} missing from SNV vcf/bcf", sample_id);
                }
                missing = true;
            }
        }
        if missing {
            return None;
        }
        let index = |id: &str| samples.iter().position(|s| s.as_str() == id);
        Some(TrioContext {
            kid: index(kid_id)?,
            dad: index(&family.dad)?,
            mom: index(&family.mom)?,
            dad_id: family.dad.clone(),
            mom_id: family.mom.clone(),
            kid_is_male: family.sex == Sex::Male,
        })
    }
}

/// Multiallelic records, non-SNV alleles and spanning deletions are not
/// usable as informative sites.
pub fn is_complex_variant(rec: &VariantRecord) -> bool {
    rec.alt_alleles.len() != 1
        || rec.ref_allele.len() > 1
        || rec.alt_alleles[0].len() > 1
        || rec.alt_alleles[0].contains('*')
}

fn is_x_chrom(chrom: &str) -> bool {
    strip_chr_prefix(chrom).eq_ignore_ascii_case("x")
}

fn allele_balance(rec: &VariantRecord, i: usize) -> f64 {
    let depth = rec.ref_depths[i] + rec.alt_depths[i];
    if depth <= 0 {
        return 0.0;
    }
    rec.alt_depths[i] as f64 / depth as f64
}

/// Infer which parental haplotype the child's allele at this site sits on,
/// for deletion/duplication de novos searched across their whole span.
///
/// Large deletions expose informative alleles by hemizygous inheritance: a
/// child homozygous over a het parent's site can only carry the haplotype
/// that did not delete. Large duplications skew the het allele balance
/// toward the duplicated haplotype, which must be at least 2:1 to call.
pub fn infer_sv_kid_allele(
    kind: VariantKind,
    rec: &VariantRecord,
    kid: usize,
    dad: usize,
    mom: usize,
    min_depth: i32,
) -> Option<KidAllele> {
    let kid_depth = rec.ref_depths[kid] + rec.alt_depths[kid];
    match kind {
        VariantKind::Del if kid_depth > 4 => match rec.genotypes[kid] {
            Genotype::HomAlt => Some(KidAllele::RefParent),
            Genotype::HomRef => Some(KidAllele::AltParent),
            _ => None,
        },
        VariantKind::Dup
            if rec.ref_depths[kid] > 2
                && rec.alt_depths[kid] > 2
                && kid_depth >= min_depth
                && rec.genotypes[kid] == Genotype::Het =>
        {
            let kid_bal = allele_balance(rec, kid);
            let parent_bal_sum = allele_balance(rec, dad) + allele_balance(rec, mom);
            // the parental shared allele being the duplicated one is
            // unphaseable this way
            if (parent_bal_sum < 1.0 && kid_bal > 0.5) || (parent_bal_sum > 1.0 && kid_bal < 0.5) {
                return None;
            }
            if kid_bal >= 0.67 {
                Some(KidAllele::AltParent)
            } else if kid_bal <= 0.33 {
                Some(KidAllele::RefParent)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Test one simple variant against one de novo, appending to its het and
/// candidate site lists as warranted. The record is assumed to have passed
/// [`is_complex_variant`].
pub(crate) fn evaluate_variant(
    denovo: &mut DenovoVariant,
    trio: &TrioContext,
    rec: &VariantRecord,
    tunables: &Tunables,
) {
    // X-linked sites in male offspring always come from mom and say nothing
    // about the de novo haplotype
    if trio.kid_is_male && is_x_chrom(&rec.chrom) {
        return;
    }
    // small events cannot contain their own informative sites
    if denovo.is_small_event() && rec.pos >= denovo.start && rec.pos < denovo.end {
        return;
    }

    let kid_gt = rec.genotypes[trio.kid];
    let parents_good = is_high_quality_site(trio.dad, rec, tunables)
        && is_high_quality_site(trio.mom, rec, tunables);

    if kid_gt == Genotype::Het && parents_good {
        denovo.het_sites.push(HetSite {
            pos: rec.pos,
            ref_allele: rec.ref_allele.clone(),
            alt_allele: rec.alt_alleles[0].clone(),
        });
    }

    let kid_allele = if tunables.whole_region && denovo.kind.is_sv() {
        match infer_sv_kid_allele(
            denovo.kind,
            rec,
            trio.kid,
            trio.dad,
            trio.mom,
            tunables.min_depth,
        ) {
            Some(kid_allele) => Some(kid_allele),
            None => return,
        }
    } else {
        if kid_gt != Genotype::Het || !is_high_quality_site(trio.kid, rec, tunables) {
            return;
        }
        None
    };

    if !parents_good {
        return;
    }

    let dad_gt = rec.genotypes[trio.dad];
    let mom_gt = rec.genotypes[trio.mom];
    let alt_parent = match assign_alt_parent(dad_gt, mom_gt) {
        Some(parent) => parent,
        None => return,
    };
    if !hemizygous_kid_allele_unique(kid_gt, dad_gt, mom_gt) {
        return;
    }

    let (alt_parent, ref_parent) = match alt_parent {
        Parent::Dad => (trio.dad_id.clone(), trio.mom_id.clone()),
        Parent::Mom => (trio.mom_id.clone(), trio.dad_id.clone()),
    };
    denovo.candidate_sites.push(CandidateSite {
        pos: rec.pos,
        ref_allele: rec.ref_allele.clone(),
        alt_allele: rec.alt_alleles[0].clone(),
        alt_parent,
        ref_parent,
        kid_allele,
    });
}
