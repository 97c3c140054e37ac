use fairywren::config::ReferenceBuild;
use fairywren::model::denovo::{DenovoVariant, VariantKind};
use fairywren::model::pedigree::{Pedigree, Sex};
use fairywren::sites::auto_phaser::{autophase_origin, autophaseable};
use fairywren::sites::parent_assignment::Parent;

fn pedigree(sex: Sex) -> Pedigree {
    let mut pedigree = Pedigree::new();
    pedigree.add_trio("kid", "dad", "mom", sex);
    pedigree
}

fn denovo(chrom: &str, start: i64) -> DenovoVariant {
    DenovoVariant::new(chrom, start, start + 1, "kid", VariantKind::Snv)
}

#[test]
fn test_male_sex_chromosomes_autophase() {
    let ped = pedigree(Sex::Male);
    let build = Some(ReferenceBuild::Grch38);
    assert!(autophaseable(&denovo("chrY", 10_000_000), &ped, build));
    assert!(autophaseable(&denovo("Y", 10_000_000), &ped, build));
    assert!(autophaseable(&denovo("chrX", 100_000_000), &ped, build));
    assert!(autophaseable(&denovo("x", 100_000_000), &ped, build));
}

#[test]
fn test_female_kid_never_autophases() {
    let ped = pedigree(Sex::Female);
    let build = Some(ReferenceBuild::Grch38);
    assert!(!autophaseable(&denovo("chrY", 10_000_000), &ped, build));
    assert!(!autophaseable(&denovo("chrX", 100_000_000), &ped, build));
}

#[test]
fn test_autosomes_never_autophase() {
    let ped = pedigree(Sex::Male);
    let build = Some(ReferenceBuild::Grch38);
    assert!(!autophaseable(&denovo("chr1", 10_000_000), &ped, build));
    assert!(!autophaseable(&denovo("22", 10_000_000), &ped, build));
}

#[test]
fn test_unknown_build_disables_autophasing() {
    let ped = pedigree(Sex::Male);
    assert!(!autophaseable(&denovo("chrY", 10_000_000), &ped, None));
}

#[test]
fn test_pseudoautosomal_boundaries_are_inclusive() {
    let ped = pedigree(Sex::Male);
    let build = Some(ReferenceBuild::Grch38);
    // PAR1 on X spans 10,001-2,781,479 on GRCh38
    assert!(!autophaseable(&denovo("chrX", 10_001), &ped, build));
    assert!(!autophaseable(&denovo("chrX", 2_781_479), &ped, build));
    assert!(!autophaseable(&denovo("chrX", 1_000_000), &ped, build));
    assert!(autophaseable(&denovo("chrX", 10_000), &ped, build));
    assert!(autophaseable(&denovo("chrX", 2_781_480), &ped, build));
    // PAR2 on X starts at 155,701,383
    assert!(!autophaseable(&denovo("chrX", 155_701_383), &ped, build));
    assert!(autophaseable(&denovo("chrX", 155_701_382), &ped, build));
}

#[test]
fn test_grch37_tables_differ() {
    let ped = pedigree(Sex::Male);
    // 2,700,000 is outside PAR1 on GRCh37 but inside it on GRCh38
    let pos = 2_700_000;
    assert!(autophaseable(
        &denovo("chrX", pos),
        &ped,
        Some(ReferenceBuild::Grch37)
    ));
    assert!(!autophaseable(
        &denovo("chrX", pos),
        &ped,
        Some(ReferenceBuild::Grch38)
    ));
}

#[test]
fn test_autophase_origin() {
    assert_eq!(autophase_origin("chrY"), Some(Parent::Dad));
    assert_eq!(autophase_origin("y"), Some(Parent::Dad));
    assert_eq!(autophase_origin("X"), Some(Parent::Mom));
    assert_eq!(autophase_origin("chr2"), None);
}
