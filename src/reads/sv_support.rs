use anyhow::Result;

use crate::model::denovo::DenovoVariant;
use crate::reads::insert_estimator::ASSUMED_READ_LEN;
use crate::sources::alignment_source::{mates_overlap, AlignmentSource, ReadRecord};

/// Split-alignment clipping may begin within this many bases of a
/// breakpoint and still count as support.
pub const SPLITTER_ERR_MARGIN: i64 = 5;

/// Reads (with their mates) supporting a structural de novo at either
/// breakpoint: split alignments clipped at the break, discordant pairs
/// whose insert matches the event length, and soft-clipped reads ending at
/// the break.
pub fn collect_sv_supporting_reads<A: AlignmentSource>(
    source: &mut A,
    denovo: &DenovoVariant,
    concordant_upper_len: f64,
) -> Result<Vec<ReadRecord>> {
    let sv_len = (denovo.end - denovo.start).abs() as f64;
    let wiggle = concordant_upper_len as i64;
    let mut supporting = Vec::new();

    for breakpoint in [denovo.start, denovo.end] {
        let reads = source.fetch(
            &denovo.chrom,
            (breakpoint - wiggle).max(0),
            breakpoint + wiggle,
        )?;
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
            if mates_overlap(&read, &mate) {
                continue;
            }

            if read.has_split_tag {
                if within_margin(read.reference_start, breakpoint, SPLITTER_ERR_MARGIN)
                    || within_margin(read.reference_end, breakpoint, SPLITTER_ERR_MARGIN)
                {
                    supporting.push(read);
                    supporting.push(mate);
                }
            } else if is_discordant_support(&read, &mate, denovo, sv_len, concordant_upper_len) {
                supporting.push(mate);
                supporting.push(read);
            } else if has_clip_at_breakpoint(&read, breakpoint) {
                supporting.push(mate);
                supporting.push(read);
            }
        }
    }
    Ok(supporting)
}

fn within_margin(pos: i64, target: i64, margin: i64) -> bool {
    target - margin <= pos && pos <= target + margin
}

/// A pair whose insert exceeds the concordant bound supports the event when
/// the insert is within 30% of the event length and the pair straddles both
/// breakpoints.
fn is_discordant_support(
    read: &ReadRecord,
    mate: &ReadRecord,
    denovo: &DenovoVariant,
    sv_len: f64,
    concordant_upper_len: f64,
) -> bool {
    let insert = (read.insert_size - 2 * ASSUMED_READ_LEN).abs() as f64;
    if insert <= concordant_upper_len {
        return false;
    }
    let ratio = (sv_len / insert).abs();
    if ratio <= 0.7 || ratio >= 1.3 {
        return false;
    }
    let leftmost = read.reference_start.min(mate.reference_start);
    let rightmost = read.reference_start.max(mate.reference_start);
    let wiggle = concordant_upper_len as i64;
    denovo.start - wiggle < leftmost
        && leftmost < denovo.start + wiggle
        && denovo.end - wiggle < rightmost
        && rightmost < denovo.end + wiggle
}

/// Soft-clipping that starts at the breakpoint: the read aligns through the
/// break at some interior base and everything before or after that base is
/// clipped.
fn has_clip_at_breakpoint(read: &ReadRecord, breakpoint: i64) -> bool {
    let positions = &read.reference_positions;
    let idx = [breakpoint, breakpoint - 1, breakpoint + 1]
        .iter()
        .find_map(|pos| positions.iter().position(|p| *p == Some(*pos)));
    let idx = match idx {
        Some(idx) => idx,
        None => return false,
    };
    if idx < 2 || idx + 4 > positions.len() {
        return false;
    }
    let before = &positions[..idx - 1];
    let after = &positions[idx + 1..];
    (!before.is_empty() && before.iter().all(|p| p.is_none()))
        || (!after.is_empty() && after.iter().all(|p| p.is_none()))
}
