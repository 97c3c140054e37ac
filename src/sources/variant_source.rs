use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use rust_htslib::bcf::record::{GenotypeAllele, Numeric};
use rust_htslib::bcf::{self, Read};

use crate::model::genotype::Genotype;

/// One multi-sample callset record, reduced to the fields the phasing scan
/// consumes. Sample arrays are parallel and ordered as
/// [`VariantSource::samples`]. Missing depths are `-1`, missing genotype
/// qualities `-1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: i64,
    pub ref_allele: String,
    pub alt_alleles: Vec<String>,
    pub genotypes: Vec<Genotype>,
    pub ref_depths: Vec<i32>,
    pub alt_depths: Vec<i32>,
    pub gt_quals: Vec<f32>,
}

pub type VariantIter<'a> = Box<dyn Iterator<Item = Result<VariantRecord>> + 'a>;

/// A region-queryable multi-sample variant callset.
///
/// `query` accepts chromosome names with or without the `chr` prefix and
/// yields records with `pos` in `[start, end]`, in coordinate order.
pub trait VariantSource {
    fn samples(&self) -> &[String];

    /// `""` or `"chr"`, matching the naming convention of the source.
    fn prefix(&self) -> &str;

    fn query(&mut self, chrom: &str, start: i64, end: i64) -> Result<VariantIter<'_>>;
}

pub fn strip_chr_prefix(chrom: &str) -> &str {
    chrom.strip_prefix("chr").unwrap_or(chrom)
}

/// Compose the region name a source expects from an arbitrarily prefixed
/// chromosome name.
pub fn region_name(prefix: &str, chrom: &str) -> String {
    format!("{}{}", prefix, strip_chr_prefix(chrom))
}

/// Indexed VCF/BCF callset backed by htslib.
pub struct VcfSource {
    reader: bcf::IndexedReader,
    samples: Vec<String>,
    prefix: String,
}

impl VcfSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<VcfSource> {
        let reader = bcf::IndexedReader::from_path(path.as_ref()).with_context(|| {
            format!("unable to open variant callset {}", path.as_ref().display())
        })?;
        let header = reader.header();
        let samples = header
            .samples()
            .iter()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect();
        let prefix = match header.rid2name(0) {
            Ok(name) if name.starts_with(b"chr") => "chr".to_string(),
            _ => String::new(),
        };
        Ok(VcfSource {
            reader,
            samples,
            prefix,
        })
    }
}

impl VariantSource for VcfSource {
    fn samples(&self) -> &[String] {
        &self.samples
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn query(&mut self, chrom: &str, start: i64, end: i64) -> Result<VariantIter<'_>> {
        let name = region_name(&self.prefix, chrom);
        let rid = match self.reader.header().name2rid(name.as_bytes()) {
            Ok(rid) => rid,
            Err(_) => {
                warn!("chromosome {} not present in variant callset", name);
                return Ok(Box::new(std::iter::empty()));
            }
        };
        let beg = start.max(0) as u64;
        self.reader
            .fetch(rid, beg, Some(end.max(0) as u64 + 1))
            .with_context(|| format!("unable to query {}:{}-{}", name, start, end))?;

        let n_samples = self.samples.len();
        let iter = self
            .reader
            .records()
            .map(move |res| {
                let rec = res.context("failed to read variant record")?;
                Ok(variant_record_from_bcf(&rec, &name, n_samples))
            })
            .filter(move |res: &Result<VariantRecord>| match res {
                Ok(rec) => start <= rec.pos && rec.pos <= end,
                Err(_) => true,
            });
        Ok(Box::new(iter))
    }
}

fn variant_record_from_bcf(rec: &bcf::Record, chrom: &str, n_samples: usize) -> VariantRecord {
    let alleles = rec.alleles();
    let ref_allele = String::from_utf8_lossy(alleles[0]).into_owned();
    let alt_alleles = alleles
        .iter()
        .skip(1)
        .map(|a| String::from_utf8_lossy(a).into_owned())
        .collect();

    let mut genotypes = vec![Genotype::Unknown; n_samples];
    if let Ok(gts) = rec.genotypes() {
        for (i, gt) in genotypes.iter_mut().enumerate() {
            *gt = classify_genotype(&gts.get(i));
        }
    }

    let mut ref_depths = vec![-1; n_samples];
    let mut alt_depths = vec![-1; n_samples];
    if let Ok(depths) = rec.format(b"AD").integer() {
        for i in 0..n_samples {
            let row: &[i32] = depths[i];
            ref_depths[i] = depth_value(row, 0);
            alt_depths[i] = depth_value(row, 1);
        }
    }

    let mut gt_quals = vec![-1.0f32; n_samples];
    if let Ok(quals) = rec.format(b"GQ").integer() {
        for i in 0..n_samples {
            if let Some(q) = quals[i].first().filter(|q| !q.is_missing()) {
                gt_quals[i] = *q as f32;
            }
        }
    } else if let Ok(quals) = rec.format(b"GQ").float() {
        for i in 0..n_samples {
            if let Some(q) = quals[i].first().filter(|q| !q.is_missing()) {
                gt_quals[i] = *q;
            }
        }
    }

    VariantRecord {
        chrom: chrom.to_string(),
        pos: rec.pos(),
        ref_allele,
        alt_alleles,
        genotypes,
        ref_depths,
        alt_depths,
        gt_quals,
    }
}

fn depth_value(row: &[i32], idx: usize) -> i32 {
    row.get(idx)
        .filter(|v| !v.is_missing())
        .copied()
        .unwrap_or(-1)
}

fn classify_genotype(gt: &bcf::record::Genotype) -> Genotype {
    let mut indices = Vec::with_capacity(2);
    for allele in gt.iter() {
        match allele {
            GenotypeAllele::Unphased(i) | GenotypeAllele::Phased(i) => indices.push(*i),
            GenotypeAllele::UnphasedMissing | GenotypeAllele::PhasedMissing => {
                return Genotype::Unknown
            }
        }
    }
    match indices.as_slice() {
        [] => Genotype::Unknown,
        [a] => {
            if *a == 0 {
                Genotype::HomRef
            } else {
                Genotype::HomAlt
            }
        }
        alleles => {
            let alt_count = alleles.iter().filter(|&&a| a > 0).count();
            if alt_count == 0 {
                Genotype::HomRef
            } else if alt_count == alleles.len() {
                Genotype::HomAlt
            } else {
                Genotype::Het
            }
        }
    }
}
