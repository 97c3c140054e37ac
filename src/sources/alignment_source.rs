use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rust_htslib::bam::record::Cigar;
use rust_htslib::bam::{self, Read};

/// One aligned read, reduced to the fields the phasing core consumes.
///
/// `reference_positions` is query-length aligned: entry `i` is the reference
/// position of query base `i`, or `None` where the base is soft-clipped or
/// inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadRecord {
    pub query_name: String,
    pub chrom: String,
    pub reference_start: i64,
    pub reference_end: i64,
    pub reference_positions: Vec<Option<i64>>,
    pub query_sequence: Vec<u8>,
    pub mapq: u8,
    pub is_qcfail: bool,
    pub is_unmapped: bool,
    pub is_duplicate: bool,
    pub is_secondary: bool,
    pub is_supplementary: bool,
    pub mate_is_unmapped: bool,
    pub is_first_in_template: bool,
    pub mate_chrom: Option<String>,
    pub mate_start: i64,
    pub insert_size: i64,
    pub has_split_tag: bool,
}

impl ReadRecord {
    /// Whether the read is usable for phasing: a primary, unique, non-failed
    /// alignment whose mate maps to the same chromosome.
    pub fn is_good(&self) -> bool {
        !(self.is_qcfail
            || self.is_unmapped
            || self.is_duplicate
            || self.mapq < 1
            || self.is_secondary
            || self.is_supplementary
            || self.mate_is_unmapped
            || self.mate_chrom.as_deref() != Some(self.chrom.as_str()))
    }

    /// Base this read carries at reference position `pos`, if aligned there.
    pub fn allele_at(&self, pos: i64) -> Option<u8> {
        let idx = self
            .reference_positions
            .iter()
            .position(|p| *p == Some(pos))?;
        self.query_sequence.get(idx).copied()
    }

    /// Soft-clipped or inserted bases in the alignment.
    pub fn gap_marker_count(&self) -> usize {
        self.reference_positions
            .iter()
            .filter(|p| p.is_none())
            .count()
    }
}

/// Resolve the base a read-pair carries at `pos`, preferring the read and
/// falling back to its mate.
pub fn pair_allele_at(read: &ReadRecord, mate: Option<&ReadRecord>, pos: i64) -> Option<u8> {
    read.allele_at(pos)
        .or_else(|| mate.and_then(|m| m.allele_at(pos)))
}

/// Mate pairs whose reference intervals overlap each other are alignment
/// artifacts and are excluded from haplotype grouping.
pub fn mates_overlap(read: &ReadRecord, mate: &ReadRecord) -> bool {
    (mate.reference_start <= read.reference_start && read.reference_start <= mate.reference_end)
        || (mate.reference_start <= read.reference_end && read.reference_end <= mate.reference_end)
}

/// A region-queryable alignment source.
///
/// `fetch` yields reads overlapping `[start, end)` in coordinate order and
/// accepts chromosome names in either `chr` convention, retrying with the
/// flipped prefix before giving up.
pub trait AlignmentSource {
    fn fetch(&mut self, chrom: &str, start: i64, end: i64) -> Result<Vec<ReadRecord>>;

    /// Primary alignment of the read's mate, or `None` when it cannot be
    /// resolved.
    fn mate(&mut self, read: &ReadRecord) -> Option<ReadRecord>;

    /// Template lengths of up to `cap` records, for insert-size estimation.
    fn sample_insert_lengths(&mut self, cap: usize) -> Result<Vec<i64>>;
}

/// Indexed BAM/CRAM alignment file backed by htslib.
pub struct BamSource {
    reader: bam::IndexedReader,
    header: bam::HeaderView,
    path: PathBuf,
    cram_ref: Option<PathBuf>,
}

impl BamSource {
    pub fn from_path<P: AsRef<Path>>(path: P, cram_ref: Option<&Path>) -> Result<BamSource> {
        let mut reader = bam::IndexedReader::from_path(path.as_ref()).with_context(|| {
            format!("unable to open alignment file {}", path.as_ref().display())
        })?;
        if let Some(fasta) = cram_ref {
            reader
                .set_reference(fasta)
                .with_context(|| format!("unable to set CRAM reference {}", fasta.display()))?;
        }
        let header = reader.header().clone();
        Ok(BamSource {
            reader,
            header,
            path: path.as_ref().to_path_buf(),
            cram_ref: cram_ref.map(Path::to_path_buf),
        })
    }

    fn resolve_tid(&self, chrom: &str) -> Option<u32> {
        self.header.tid(chrom.as_bytes()).or_else(|| {
            let flipped = match chrom.strip_prefix("chr") {
                Some(stripped) => stripped.to_string(),
                None => format!("chr{}", chrom),
            };
            self.header.tid(flipped.as_bytes())
        })
    }
}

impl AlignmentSource for BamSource {
    fn fetch(&mut self, chrom: &str, start: i64, end: i64) -> Result<Vec<ReadRecord>> {
        let tid = self
            .resolve_tid(chrom)
            .ok_or_else(|| anyhow!("chromosome {} not present in alignment file", chrom))?;
        self.reader
            .fetch((tid as i32, start.max(0), end.max(0)))
            .with_context(|| format!("unable to fetch {}:{}-{}", chrom, start, end))?;
        let mut reads = Vec::new();
        for res in self.reader.records() {
            let rec = res.context("failed to read alignment record")?;
            reads.push(read_record_from_bam(&rec, &self.header));
        }
        Ok(reads)
    }

    fn mate(&mut self, read: &ReadRecord) -> Option<ReadRecord> {
        let chrom = read.mate_chrom.clone()?;
        let tid = self.resolve_tid(&chrom)?;
        self.reader
            .fetch((tid as i32, read.mate_start, read.mate_start + 1))
            .ok()?;
        for res in self.reader.records() {
            let rec = match res {
                Ok(rec) => rec,
                Err(_) => continue,
            };
            if rec.is_secondary() || rec.is_supplementary() {
                continue;
            }
            if rec.pos() != read.mate_start
                || rec.is_first_in_template() == read.is_first_in_template
            {
                continue;
            }
            if rec.qname() != read.query_name.as_bytes() {
                continue;
            }
            return Some(read_record_from_bam(&rec, &self.header));
        }
        None
    }

    fn sample_insert_lengths(&mut self, cap: usize) -> Result<Vec<i64>> {
        let mut reader = bam::Reader::from_path(&self.path)
            .with_context(|| format!("unable to reopen alignment file {}", self.path.display()))?;
        if let Some(fasta) = &self.cram_ref {
            reader.set_reference(fasta)?;
        }
        let mut tlens = Vec::new();
        for res in reader.records() {
            let rec = res.context("failed to read alignment record")?;
            tlens.push(rec.insert_size());
            if tlens.len() >= cap {
                break;
            }
        }
        Ok(tlens)
    }
}

fn read_record_from_bam(rec: &bam::Record, header: &bam::HeaderView) -> ReadRecord {
    let qlen = rec.seq_len();
    let mut reference_positions = vec![None; qlen];
    let mut qpos = 0usize;
    let mut rpos = rec.pos();
    for c in rec.cigar().iter() {
        match *c {
            Cigar::Match(len) | Cigar::Equal(len) | Cigar::Diff(len) => {
                for i in 0..len as usize {
                    if qpos + i < qlen {
                        reference_positions[qpos + i] = Some(rpos + i as i64);
                    }
                }
                qpos += len as usize;
                rpos += len as i64;
            }
            Cigar::Ins(len) | Cigar::SoftClip(len) => qpos += len as usize,
            Cigar::Del(len) | Cigar::RefSkip(len) => rpos += len as i64,
            Cigar::HardClip(_) | Cigar::Pad(_) => {}
        }
    }

    let chrom = if rec.tid() >= 0 {
        String::from_utf8_lossy(header.tid2name(rec.tid() as u32)).into_owned()
    } else {
        String::new()
    };
    let mate_chrom = if rec.mtid() >= 0 {
        Some(String::from_utf8_lossy(header.tid2name(rec.mtid() as u32)).into_owned())
    } else {
        None
    };

    ReadRecord {
        query_name: String::from_utf8_lossy(rec.qname()).into_owned(),
        chrom,
        reference_start: rec.pos(),
        reference_end: rec.cigar().end_pos(),
        reference_positions,
        query_sequence: rec.seq().as_bytes(),
        mapq: rec.mapq(),
        is_qcfail: rec.is_quality_check_failed(),
        is_unmapped: rec.is_unmapped(),
        is_duplicate: rec.is_duplicate(),
        is_secondary: rec.is_secondary(),
        is_supplementary: rec.is_supplementary(),
        mate_is_unmapped: rec.is_mate_unmapped(),
        is_first_in_template: rec.is_first_in_template(),
        mate_chrom,
        mate_start: rec.mpos(),
        insert_size: rec.insert_size(),
        has_split_tag: rec.aux(b"SA").is_ok(),
    }
}
