pub mod denovo;
pub mod genotype;
pub mod pedigree;
