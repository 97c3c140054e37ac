use crate::model::genotype::Genotype;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Dad,
    Mom,
}

impl Parent {
    pub fn other(self) -> Parent {
        match self {
            Parent::Dad => Parent::Mom,
            Parent::Mom => Parent::Dad,
        }
    }
}

/// Decide which parent carries the alternate allele at a candidate site.
///
/// The first matching rule wins: a parent with the alternate allele opposite
/// a hom-ref parent contributed it; with one het and one hom-alt parent the
/// hom-alt parent must have contributed the alternate, so the het parent is
/// the one whose transmission is informative.
pub fn assign_alt_parent(dad: Genotype, mom: Genotype) -> Option<Parent> {
    use Genotype::*;
    if matches!(dad, Het | HomAlt) && mom == HomRef {
        Some(Parent::Dad)
    } else if matches!(mom, Het | HomAlt) && dad == HomRef {
        Some(Parent::Mom)
    } else if mom == Het && dad == HomAlt {
        Some(Parent::Dad)
    } else if dad == Het && mom == HomAlt {
        Some(Parent::Mom)
    } else {
        None
    }
}

/// For a homozygous child, the inherited allele must be uniquely
/// attributable: when one parent is het and the other homozygous, a child
/// matching the homozygous parent's call could have inherited that allele
/// from either parent.
pub fn hemizygous_kid_allele_unique(kid: Genotype, dad: Genotype, mom: Genotype) -> bool {
    if !kid.is_hom() {
        return true;
    }
    let parents = [dad, mom];
    if parents.contains(&Genotype::Het) && parents.iter().any(|g| g.is_hom()) {
        for parent in parents {
            if parent.is_hom() && kid == parent {
                return false;
            }
        }
    }
    true
}
