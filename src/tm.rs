use crate::constants::{DNA_CONC, GAS_CONSTANT, KELVIN};
use crate::error::{PrimerError, Result};
use crate::nn_params::{self, SALT_ENTROPY_COEFF, Thermo};
use itertools::Itertools;

/// Reaction conditions for the two-state melting model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermoConditions {
    /// Monovalent cation concentration (mM)
    pub mv_conc: f64,
    /// Concentration of each strand (nM)
    pub dna_conc: f64,
}

fn validate(sequence: &str) -> Result<String> {
    if sequence.is_empty() {
        return Err(PrimerError::EmptySequence);
    }
    let upper = sequence.to_ascii_uppercase();
    if let Some((position, base)) = upper
        .chars()
        .find_position(|c| !matches!(c, 'A' | 'C' | 'G' | 'T'))
    {
        return Err(PrimerError::InvalidBase { base, position });
    }
    Ok(upper)
}

/**
 * Nearest-neighbor Tm (°C) at `mv_conc` mM Na+ and the default primer concentration.
 */
pub fn calculate_tm(sequence: &str, mv_conc: f64) -> Result<f64> {
    calculate_tm_with(
        sequence,
        &ThermoConditions {
            mv_conc,
            dna_conc: DNA_CONC,
        },
    )
}

/**
 * Nearest-neighbor Tm (°C) of `sequence` against its perfect complement.
 *
 * Sums terminal initiation and stacking ΔH/ΔS, corrects ΔS for the cation
 * concentration and solves the two-state equation for two equimolar,
 * non-self-complementary strands.
 */
pub fn calculate_tm_with(sequence: &str, conditions: &ThermoConditions) -> Result<f64> {
    let seq = validate(sequence)?;
    let bases: Vec<char> = seq.chars().collect();

    let mut total = Thermo { dh: 0.0, ds: 0.0 };
    for end in [bases[0], bases[bases.len() - 1]] {
        if let Some(init) = nn_params::terminal(end) {
            total.dh += init.dh;
            total.ds += init.ds;
        }
    }
    for (a, b) in bases.iter().copied().tuple_windows() {
        if let Some(params) = nn_params::stack(a, b) {
            total.dh += params.dh;
            total.ds += params.ds;
        }
    }

    let mv = conditions.mv_conc * 1e-3;
    total.ds += SALT_ENTROPY_COEFF * (bases.len() - 1) as f64 * mv.ln();

    let ct = (conditions.dna_conc - conditions.dna_conc / 2.0) * 1e-9;
    let tm = (1000.0 * total.dh) / (total.ds + GAS_CONSTANT * ct.ln()) - KELVIN;
    log::trace!("Tm({}) = {:.4}, dH={:.2} dS={:.2}", seq, tm, total.dh, total.ds);
    Ok(tm)
}
