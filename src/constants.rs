// Primer binding length (nt), excludes the restriction site
pub const PRIMER_MIN_LEN: usize = 18;
pub const PRIMER_MAX_LEN: usize = 25;
// GC content of the full primer (%)
pub const PRIMER_MIN_GC: f64 = 40.0;
pub const PRIMER_MAX_GC: f64 = 60.0;
// Tm of the full primer (°C)
pub const PRIMER_MIN_TM: f64 = 58.0;
pub const PRIMER_MAX_TM: f64 = 65.0;
// Monovalent cation concentration (mM)
pub const MV_CONC: f64 = 50.0;
// Primer concentration, each strand (nM)
pub const DNA_CONC: f64 = 25.0;

// Universal gas constant (cal/K·mol)
pub const GAS_CONSTANT: f64 = 1.987;
pub const KELVIN: f64 = 273.15;

// Weight applied to the length term of the deviation score
pub const LENGTH_PENALTY_WEIGHT: f64 = 2.0;

pub const NOTE_OPTIMAL: &str = "Optimal primer found within specified criteria.";
pub const NOTE_BEST_EFFORT: &str = "Best effort primer found, but not all criteria met.";
pub const NOTE_NOT_FOUND: &str = "Could not find any suitable primer within the given constraints.";
pub const OVERALL_NOTES: &str = "Primers designed considering length, GC content, and Tm. Tm calculated using Nearest-Neighbor method.";

pub const FORMAT_CSV: &str = "csv";
pub const FORMAT_JSON: &str = "json";
