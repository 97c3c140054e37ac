/// Diploid genotype call for one sample at one site.
///
/// Multiallelic records are reduced before they reach this type: the scan
/// only considers biallelic SNVs, so "alt" always refers to the single
/// alternate allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genotype {
    HomRef,
    Het,
    HomAlt,
    Unknown,
}

impl Genotype {
    pub fn is_hom(self) -> bool {
        matches!(self, Genotype::HomRef | Genotype::HomAlt)
    }
}
