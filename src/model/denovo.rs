/// Variant class of a de novo call. Point mutations and small indels are
/// phased through the child's heterozygous sites; deletions, duplications
/// and inversions go through the structural-variant read collection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Snv,
    Indel,
    Del,
    Dup,
    Inv,
}

impl VariantKind {
    pub fn from_name(name: &str) -> Option<VariantKind> {
        match name.to_ascii_uppercase().as_str() {
            "SNV" | "POINT" => Some(VariantKind::Snv),
            "INDEL" => Some(VariantKind::Indel),
            "DEL" => Some(VariantKind::Del),
            "DUP" => Some(VariantKind::Dup),
            "INV" => Some(VariantKind::Inv),
            _ => None,
        }
    }

    pub fn is_sv(self) -> bool {
        matches!(self, VariantKind::Del | VariantKind::Dup | VariantKind::Inv)
    }
}

/// Which parental haplotype the child's allele at a candidate site belongs
/// to. Only set for deletion/duplication candidates genotyped by hemizygous
/// or unbalanced-heterozygous inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KidAllele {
    AltParent,
    RefParent,
}

/// A site whose trio genotypes reveal which parent contributed the
/// alternate allele.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSite {
    pub pos: i64,
    pub ref_allele: String,
    pub alt_allele: String,
    pub alt_parent: String,
    pub ref_parent: String,
    pub kid_allele: Option<KidAllele>,
}

/// A site where the child is heterozygous and both parents are confidently
/// genotyped. Used as a bridge when linking read-pairs across haplotypes.
#[derive(Debug, Clone, PartialEq)]
pub struct HetSite {
    pub pos: i64,
    pub ref_allele: String,
    pub alt_allele: String,
}

/// A de novo variant in one child, annotated in place by the informative
/// site scan. Coordinates are 0-based; `end` is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct DenovoVariant {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
    pub kid_id: String,
    pub kind: VariantKind,
    pub candidate_sites: Vec<CandidateSite>,
    pub het_sites: Vec<HetSite>,
}

impl DenovoVariant {
    pub fn new(chrom: &str, start: i64, end: i64, kid_id: &str, kind: VariantKind) -> DenovoVariant {
        DenovoVariant {
            chrom: chrom.to_string(),
            start,
            end,
            kid_id: kid_id.to_string(),
            kind,
            candidate_sites: Vec::new(),
            het_sites: Vec::new(),
        }
    }

    /// Events shorter than this cannot contain their own informative sites.
    pub const SMALL_EVENT_LEN: i64 = 20;

    pub fn is_small_event(&self) -> bool {
        self.end - self.start < Self::SMALL_EVENT_LEN
    }
}
