pub mod grouper;
pub mod insert_estimator;
pub mod read_collector;
pub mod site_search;
pub mod sv_support;

pub use grouper::{group_reads_by_haplotype, GroupedReads, EXTENDED_RB_READ_GOAL};
pub use insert_estimator::{concordant_insert_bound, estimate_concordant_insert_len};
pub use read_collector::{collect_reads_snv, collect_reads_sv};
pub use sv_support::collect_sv_supporting_reads;
