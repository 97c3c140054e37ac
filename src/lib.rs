//! Fairywren assigns de novo variants observed in a parent-offspring trio to
//! the parental haplotype they arose on. Nearby informative sites in a joint
//! variant callset reveal which parent contributed the alternate allele, and
//! aligned read-pairs are partitioned into the two child haplotypes by
//! transitively linking reads that co-observe alleles at heterozygous sites.

pub mod config;
pub mod model;
pub mod reads;
pub mod sites;
pub mod sources;

pub use crate::config::{ReferenceBuild, Tunables};
pub use crate::model::denovo::{CandidateSite, DenovoVariant, HetSite, KidAllele, VariantKind};
pub use crate::model::genotype::Genotype;
pub use crate::model::pedigree::{Family, Pedigree, Sex};
