use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::config::ReferenceBuild;
use crate::model::denovo::DenovoVariant;
use crate::model::pedigree::{Pedigree, Sex};
use crate::sites::parent_assignment::Parent;
use crate::sources::variant_source::strip_chr_prefix;

lazy_static! {
    static ref GRCH37_PAR1: HashMap<&'static str, (i64, i64)> =
        HashMap::from([("x", (60_001, 2_699_520)), ("y", (10_001, 2_649_520))]);
    static ref GRCH37_PAR2: HashMap<&'static str, (i64, i64)> = HashMap::from([
        ("x", (154_931_044, 155_260_560)),
        ("y", (59_034_050, 59_363_566)),
    ]);
    static ref GRCH38_PAR1: HashMap<&'static str, (i64, i64)> =
        HashMap::from([("x", (10_001, 2_781_479)), ("y", (10_001, 2_781_479))]);
    static ref GRCH38_PAR2: HashMap<&'static str, (i64, i64)> = HashMap::from([
        ("x", (155_701_383, 156_030_895)),
        ("y", (56_887_903, 57_217_415)),
    ]);
}

/// Sex-chromosome variants in males outside the pseudoautosomal regions are
/// hemizygous and phase without any informative-site search: Y is paternal,
/// X maternal.
pub fn autophaseable(
    denovo: &DenovoVariant,
    pedigree: &Pedigree,
    build: Option<ReferenceBuild>,
) -> bool {
    let chrom = strip_chr_prefix(&denovo.chrom).to_lowercase();
    if chrom != "x" && chrom != "y" {
        return false;
    }
    let family = match pedigree.family(&denovo.kid_id) {
        Some(family) => family,
        None => return false,
    };
    if family.sex != Sex::Male {
        return false;
    }
    let (par1, par2) = match build {
        Some(ReferenceBuild::Grch37) => (&*GRCH37_PAR1, &*GRCH37_PAR2),
        Some(ReferenceBuild::Grch38) => (&*GRCH38_PAR1, &*GRCH38_PAR2),
        None => return false,
    };
    let pseudoautosomal = [par1, par2].iter().any(|par| match par.get(chrom.as_str()) {
        Some(&(start, end)) => start <= denovo.start && denovo.start <= end,
        None => false,
    });
    !pseudoautosomal
}

/// Parent an auto-phaseable variant is assigned to.
pub fn autophase_origin(chrom: &str) -> Option<Parent> {
    match strip_chr_prefix(chrom).to_lowercase().as_str() {
        "y" => Some(Parent::Dad),
        "x" => Some(Parent::Mom),
        _ => None,
    }
}
