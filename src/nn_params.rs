//! Unified nearest-neighbor parameters for Watson-Crick DNA/DNA duplexes.
//!
//! Values from Allawi & SantaLucia (1997), as unified in SantaLucia (1998),
//! at 1 M NaCl. Enthalpies in kcal/mol, entropies in cal/(K·mol).

pub const NN_TABLE_VERSION: &str = "SantaLucia-1998-unified";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thermo {
    pub dh: f64,
    pub ds: f64,
}

const fn thermo(dh: f64, ds: f64) -> Thermo {
    Thermo { dh, ds }
}

/// Initiation for a terminal A·T pair, applied once per duplex end.
pub const INIT_AT: Thermo = thermo(2.3, 4.1);
/// Initiation for a terminal G·C pair, applied once per duplex end.
pub const INIT_GC: Thermo = thermo(0.1, -2.8);
/// Entropy term per phosphate for the salt correction.
pub const SALT_ENTROPY_COEFF: f64 = 0.368;

/// The ten unique stacks, keyed by the 5'->3' dinucleotide of the top strand.
const STACKS: [(&str, Thermo); 10] = [
    ("AA", thermo(-7.9, -22.2)),
    ("AT", thermo(-7.2, -20.4)),
    ("TA", thermo(-7.2, -21.3)),
    ("CA", thermo(-8.5, -22.7)),
    ("GT", thermo(-8.4, -22.4)),
    ("CT", thermo(-7.8, -21.0)),
    ("GA", thermo(-8.2, -22.2)),
    ("CG", thermo(-10.6, -27.2)),
    ("GC", thermo(-9.8, -24.4)),
    ("GG", thermo(-8.0, -19.9)),
];

fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

fn lookup(a: char, b: char) -> Option<Thermo> {
    STACKS
        .iter()
        .find(|(key, _)| {
            let mut chars = key.chars();
            chars.next() == Some(a) && chars.next() == Some(b)
        })
        .map(|(_, params)| *params)
}

/// Stack parameters for the dinucleotide `ab`.
///
/// A stack read on the top strand and the same stack read on the bottom strand
/// (`ab` vs. the reverse complement of `ab`) share one entry.
pub fn stack(a: char, b: char) -> Option<Thermo> {
    lookup(a, b).or_else(|| lookup(complement(b)?, complement(a)?))
}

/// Initiation term for a terminal base.
pub fn terminal(base: char) -> Option<Thermo> {
    match base {
        'A' | 'T' => Some(INIT_AT),
        'C' | 'G' => Some(INIT_GC),
        _ => None,
    }
}
