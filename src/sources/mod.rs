pub mod alignment_source;
pub mod in_memory;
pub mod variant_source;
