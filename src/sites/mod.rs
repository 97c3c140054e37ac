pub mod auto_phaser;
pub mod batch_finder;
pub mod parent_assignment;
pub mod site_finder;
pub mod site_quality;
pub mod variant_eval;

pub use auto_phaser::{autophase_origin, autophaseable};
pub use batch_finder::BatchFinder;
pub use parent_assignment::{assign_alt_parent, hemizygous_kid_allele_unique, Parent};
pub use site_finder::SiteFinder;
pub use site_quality::is_high_quality_site;
