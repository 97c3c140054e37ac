use fairywren::config::Tunables;
use fairywren::model::genotype::Genotype;
use fairywren::sites::site_quality::is_high_quality_site;
use fairywren::sources::variant_source::VariantRecord;

fn single_sample_site(gt: Genotype, ref_depth: i32, alt_depth: i32, gt_qual: f32) -> VariantRecord {
    VariantRecord {
        chrom: "1".to_string(),
        pos: 1000,
        ref_allele: "A".to_string(),
        alt_alleles: vec!["T".to_string()],
        genotypes: vec![gt],
        ref_depths: vec![ref_depth],
        alt_depths: vec![alt_depth],
        gt_quals: vec![gt_qual],
    }
}

#[test]
fn test_hom_ref_band() {
    let tunables = Tunables::default();
    let clean = single_sample_site(Genotype::HomRef, 20, 0, 60.0);
    assert!(is_high_quality_site(0, &clean, &tunables));

    // allele balance exactly at the band edge is accepted
    let edge = single_sample_site(Genotype::HomRef, 16, 4, 60.0);
    assert!(is_high_quality_site(0, &edge, &tunables));

    let contaminated = single_sample_site(Genotype::HomRef, 15, 5, 60.0);
    assert!(!is_high_quality_site(0, &contaminated, &tunables));
}

#[test]
fn test_het_band() {
    let tunables = Tunables::default();
    let balanced = single_sample_site(Genotype::Het, 10, 10, 60.0);
    assert!(is_high_quality_site(0, &balanced, &tunables));

    let skewed = single_sample_site(Genotype::Het, 16, 4, 60.0);
    assert!(!is_high_quality_site(0, &skewed, &tunables));
}

#[test]
fn test_hom_alt_band() {
    let tunables = Tunables::default();
    let clean = single_sample_site(Genotype::HomAlt, 0, 20, 60.0);
    assert!(is_high_quality_site(0, &clean, &tunables));

    let contaminated = single_sample_site(Genotype::HomAlt, 5, 15, 60.0);
    assert!(!is_high_quality_site(0, &contaminated, &tunables));
}

#[test]
fn test_unknown_genotype_rejected() {
    let tunables = Tunables::default();
    let uncalled = single_sample_site(Genotype::Unknown, 10, 10, 60.0);
    assert!(!is_high_quality_site(0, &uncalled, &tunables));
}

#[test]
fn test_low_genotype_quality_rejected() {
    let tunables = Tunables::default();
    let shaky = single_sample_site(Genotype::Het, 10, 10, 19.0);
    assert!(!is_high_quality_site(0, &shaky, &tunables));

    let just_enough = single_sample_site(Genotype::Het, 10, 10, 20.0);
    assert!(is_high_quality_site(0, &just_enough, &tunables));
}

#[test]
fn test_low_depth_rejected() {
    let tunables = Tunables::default();
    let shallow = single_sample_site(Genotype::Het, 4, 5, 60.0);
    assert!(!is_high_quality_site(0, &shallow, &tunables));

    let just_enough = single_sample_site(Genotype::Het, 5, 5, 60.0);
    assert!(is_high_quality_site(0, &just_enough, &tunables));
}

#[test]
fn test_missing_depths_rejected() {
    let tunables = Tunables::default();
    let missing = single_sample_site(Genotype::Het, -1, -1, 60.0);
    assert!(!is_high_quality_site(0, &missing, &tunables));
}
