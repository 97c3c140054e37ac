use fairywren::model::denovo::{DenovoVariant, VariantKind};
use fairywren::reads::read_collector::collect_reads_sv;
use fairywren::reads::sv_support::collect_sv_supporting_reads;
use fairywren::sources::alignment_source::ReadRecord;
use fairywren::sources::in_memory::{artificial_pair, InMemoryAlignmentSource};

const BOUND: f64 = 1000.0;

fn deletion() -> DenovoVariant {
    DenovoVariant::new("1", 10_000, 13_000, "kid", VariantKind::Del)
}

fn names(reads: &[ReadRecord]) -> Vec<&str> {
    let mut names: Vec<&str> = reads.iter().map(|r| r.query_name.as_str()).collect();
    names.sort();
    names.dedup();
    names
}

fn plain_seq(len: usize) -> String {
    "A".repeat(len)
}

#[test]
fn test_split_read_at_breakpoint() {
    let (mut read, mate) = artificial_pair(
        "splitter",
        "1",
        10_003,
        &plain_seq(150),
        10_400,
        &plain_seq(150),
    );
    read.has_split_tag = true;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert_eq!(names(&support), vec!["splitter"]);
}

#[test]
fn test_split_read_too_far_from_breakpoint() {
    let (mut read, mate) = artificial_pair(
        "splitter",
        "1",
        10_006,
        &plain_seq(150),
        10_400,
        &plain_seq(150),
    );
    // clipped alignment starts 6 bases from the break and ends nowhere near
    read.has_split_tag = true;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert!(support.is_empty());
}

#[test]
fn test_discordant_pair_straddling_breakpoints() {
    let (mut read, mut mate) = artificial_pair(
        "discordant",
        "1",
        9_900,
        &plain_seq(150),
        12_900,
        &plain_seq(150),
    );
    // template spans the deleted interval: insert of ~3000 matches the
    // 3000 base event
    let tlen = (12_900 + 150) - 9_900;
    read.insert_size = tlen + 302;
    mate.insert_size = -(tlen + 302);
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert_eq!(names(&support), vec!["discordant"]);
}

#[test]
fn test_concordant_pair_ignored() {
    let (read, mate) = artificial_pair(
        "concordant",
        "1",
        9_900,
        &plain_seq(150),
        10_200,
        &plain_seq(150),
    );
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert!(support.is_empty());
}

#[test]
fn test_discordant_insert_must_match_event_length() {
    let (mut read, mut mate) = artificial_pair(
        "wrong_size",
        "1",
        9_900,
        &plain_seq(150),
        19_900,
        &plain_seq(150),
    );
    // insert of ~10,000 against a 3000 base event
    let tlen = (19_900 + 150) - 9_900;
    read.insert_size = tlen + 302;
    mate.insert_size = -(tlen + 302);
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert!(support.is_empty());
}

#[test]
fn test_soft_clip_ending_at_breakpoint() {
    let (mut read, mate) = artificial_pair(
        "clipped",
        "1",
        9_900,
        &plain_seq(150),
        10_300,
        &plain_seq(150),
    );
    // aligned through the break at offset 100, clipped beyond it
    for i in 101..150 {
        read.reference_positions[i] = None;
    }
    read.reference_end = 10_001;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert_eq!(names(&support), vec!["clipped"]);
}

#[test]
fn test_interior_clip_required() {
    let (mut read, mate) = artificial_pair(
        "edge_clip",
        "1",
        9_999,
        &plain_seq(150),
        10_300,
        &plain_seq(150),
    );
    // the break sits at read offset 1, too close to the read end to trust
    for i in 2..150 {
        read.reference_positions[i] = None;
    }
    read.reference_end = 10_001;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert!(support.is_empty());
}

#[test]
fn test_overlapping_mates_rejected() {
    let (mut read, mate) = artificial_pair(
        "overlap",
        "1",
        10_003,
        &plain_seq(150),
        10_050,
        &plain_seq(150),
    );
    read.has_split_tag = true;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let support = collect_sv_supporting_reads(&mut source, &deletion(), BOUND).unwrap();
    assert!(support.is_empty());
}

#[test]
fn test_no_extended_returns_seed_support_only() {
    let (mut read, mate) = artificial_pair(
        "splitter",
        "1",
        10_003,
        &plain_seq(150),
        10_400,
        &plain_seq(150),
    );
    read.has_split_tag = true;
    let mut source = InMemoryAlignmentSource::new(vec![read, mate]);
    let grouped =
        collect_reads_sv(&mut source, &deletion(), &[], Some(BOUND), true).unwrap();
    assert_eq!(names(&grouped.alt), vec!["splitter"]);
    assert!(grouped.ref_reads.is_empty());
}
