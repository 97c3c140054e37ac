//! In-memory variant and alignment sources. Used by the unit tests and by
//! embedders that already hold decoded records.

use anyhow::Result;

use crate::sources::alignment_source::{AlignmentSource, ReadRecord};
use crate::sources::variant_source::{strip_chr_prefix, VariantIter, VariantRecord, VariantSource};

#[derive(Debug, Clone, Default)]
pub struct InMemoryVariantSource {
    samples: Vec<String>,
    prefix: String,
    records: Vec<VariantRecord>,
}

impl InMemoryVariantSource {
    pub fn new(samples: Vec<String>, mut records: Vec<VariantRecord>) -> InMemoryVariantSource {
        records.sort_by(|a, b| a.chrom.cmp(&b.chrom).then(a.pos.cmp(&b.pos)));
        InMemoryVariantSource {
            samples,
            prefix: String::new(),
            records,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> InMemoryVariantSource {
        self.prefix = prefix.to_string();
        self
    }
}

impl VariantSource for InMemoryVariantSource {
    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn query(&mut self, chrom: &str, start: i64, end: i64) -> Result<VariantIter<'_>> {
        let wanted = strip_chr_prefix(chrom).to_string();
        let iter = self
            .records
            .iter()
            .filter(move |rec| {
                strip_chr_prefix(&rec.chrom) == wanted && start <= rec.pos && rec.pos <= end
            })
            .cloned()
            .map(Ok);
        Ok(Box::new(iter))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAlignmentSource {
    reads: Vec<ReadRecord>,
}

impl InMemoryAlignmentSource {
    pub fn new(mut reads: Vec<ReadRecord>) -> InMemoryAlignmentSource {
        reads.sort_by(|a, b| {
            a.chrom
                .cmp(&b.chrom)
                .then(a.reference_start.cmp(&b.reference_start))
        });
        InMemoryAlignmentSource { reads }
    }
}

impl AlignmentSource for InMemoryAlignmentSource {
    fn fetch(&mut self, chrom: &str, start: i64, end: i64) -> Result<Vec<ReadRecord>> {
        let wanted = strip_chr_prefix(chrom).to_string();
        Ok(self
            .reads
            .iter()
            .filter(|r| {
                strip_chr_prefix(&r.chrom) == wanted
                    && r.reference_start < end
                    && r.reference_end > start
            })
            .cloned()
            .collect())
    }

    fn mate(&mut self, read: &ReadRecord) -> Option<ReadRecord> {
        self.reads
            .iter()
            .find(|r| {
                r.query_name == read.query_name
                    && !r.is_secondary
                    && !r.is_supplementary
                    && r.is_first_in_template != read.is_first_in_template
            })
            .cloned()
    }

    fn sample_insert_lengths(&mut self, cap: usize) -> Result<Vec<i64>> {
        Ok(self.reads.iter().take(cap).map(|r| r.insert_size).collect())
    }
}

/// A clean, fully aligned single-end record for constructing fixtures.
pub fn artificial_read(
    name: &str,
    chrom: &str,
    start: i64,
    sequence: &str,
    first_in_template: bool,
) -> ReadRecord {
    let len = sequence.len() as i64;
    ReadRecord {
        query_name: name.to_string(),
        chrom: chrom.to_string(),
        reference_start: start,
        reference_end: start + len,
        reference_positions: (start..start + len).map(Some).collect(),
        query_sequence: sequence.as_bytes().to_vec(),
        mapq: 40,
        is_qcfail: false,
        is_unmapped: false,
        is_duplicate: false,
        is_secondary: false,
        is_supplementary: false,
        mate_is_unmapped: false,
        is_first_in_template: first_in_template,
        mate_chrom: Some(chrom.to_string()),
        mate_start: start,
        insert_size: 0,
        has_split_tag: false,
    }
}

/// A proper read-pair: two clean alignments on one chromosome pointing at
/// each other, with template length set from the outer span.
pub fn artificial_pair(
    name: &str,
    chrom: &str,
    start1: i64,
    seq1: &str,
    start2: i64,
    seq2: &str,
) -> (ReadRecord, ReadRecord) {
    let mut first = artificial_read(name, chrom, start1, seq1, true);
    let mut second = artificial_read(name, chrom, start2, seq2, false);
    let tlen = (start2 + seq2.len() as i64) - start1;
    first.mate_start = second.reference_start;
    second.mate_start = first.reference_start;
    first.insert_size = tlen;
    second.insert_size = -tlen;
    (first, second)
}
