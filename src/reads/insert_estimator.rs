use anyhow::Result;
use log::debug;
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::sources::alignment_source::AlignmentSource;

/// Template lengths are corrected by twice this assumed read length before
/// aggregation.
pub const ASSUMED_READ_LEN: i64 = 151;

/// Alignments sampled when estimating the concordant insert bound.
pub const INSERT_SAMPLE_CAP: usize = 1_000_000;

const STDEV_COUNT: f64 = 3.0;

/// Upper bound on the insert length of a concordant read-pair, from a sample
/// of template lengths: the top 0.5% of `|tlen - 2 * readlen|` values are
/// discarded as artifacts and the bound is the remainder's mean plus three
/// standard deviations. Inserts beyond the bound are evidence of a
/// structural variant.
pub fn concordant_insert_bound(tlens: &[i64]) -> f64 {
    let inserts: Vec<f64> = tlens
        .iter()
        .map(|tlen| (tlen - 2 * ASSUMED_READ_LEN).abs() as f64)
        .collect();
    if inserts.is_empty() {
        return 0.0;
    }
    let cutoff = Data::new(inserts.clone()).quantile(0.995);
    let kept: Vec<f64> = inserts.into_iter().filter(|v| *v <= cutoff).collect();
    if kept.is_empty() {
        return 0.0;
    }
    let mean = (&kept).mean();
    let stdev = if kept.len() < 2 {
        0.0
    } else {
        (&kept).std_dev()
    };
    mean + STDEV_COUNT * stdev
}

pub fn estimate_concordant_insert_len<A: AlignmentSource>(source: &mut A) -> Result<f64> {
    let tlens = source.sample_insert_lengths(INSERT_SAMPLE_CAP)?;
    let bound = concordant_insert_bound(&tlens);
    debug!(
        "concordant insert upper bound {:.1} from {} alignments",
        bound,
        tlens.len()
    );
    Ok(bound)
}
