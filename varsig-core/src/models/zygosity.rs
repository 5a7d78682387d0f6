#[cfg(feature = "serde")]
use serde::Serialize;

/// Zygosity of one sample at one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Zygosity {
    HomRef,
    HomAlt,
    Het,
}

impl Zygosity {
    ///
    /// Binary mutation indicator: 0 for hom-ref, 1 for anything carrying an alternate allele.
    ///
    pub fn flag(&self) -> u8 {
        match self {
            Zygosity::HomRef => 0,
            Zygosity::HomAlt | Zygosity::Het => 1,
        }
    }
}

/// Per-record zygosity tally across all samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenotypeCounts {
    pub hom_ref: u32,
    pub hom_alt: u32,
    pub het: u32,
}

impl GenotypeCounts {
    pub fn add(&mut self, zygosity: Zygosity) {
        match zygosity {
            Zygosity::HomRef => self.hom_ref += 1,
            Zygosity::HomAlt => self.hom_alt += 1,
            Zygosity::Het => self.het += 1,
        }
    }

    /// Always equals the number of samples the counts were built from.
    pub fn total(&self) -> u32 {
        self.hom_ref + self.hom_alt + self.het
    }
}

impl FromIterator<Zygosity> for GenotypeCounts {
    fn from_iter<I: IntoIterator<Item = Zygosity>>(iter: I) -> Self {
        let mut counts = GenotypeCounts::default();
        for zygosity in iter {
            counts.add(zygosity);
        }
        counts
    }
}
