use crate::config::DesignCriteria;
use crate::constants::OVERALL_NOTES;
use crate::error::{PrimerError, Result};
use crate::primer::{Orientation, PrimerCandidate, find_optimal_primer};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrimerDetails {
    pub binding_part: String,
    pub length: usize,
    pub gc_content: f64,
    pub tm: f64,
    pub notes: String,
}

impl From<&PrimerCandidate> for PrimerDetails {
    fn from(candidate: &PrimerCandidate) -> Self {
        PrimerDetails {
            binding_part: candidate.binding_part.clone(),
            length: candidate.binding_length,
            gc_content: candidate.gc_percent,
            tm: candidate.tm_celsius,
            notes: candidate.notes().to_string(),
        }
    }
}

/// Forward and reverse primers designed for one CDS.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrimerDesignResult {
    pub forward_primer: String,
    pub forward_primer_details: PrimerDetails,
    pub reverse_primer: String,
    pub reverse_primer_details: PrimerDetails,
    pub overall_notes: String,

    #[serde(skip)]
    pub forward: PrimerCandidate,
    #[serde(skip)]
    pub reverse: PrimerCandidate,
}

impl PrimerDesignResult {
    fn new(forward: PrimerCandidate, reverse: PrimerCandidate) -> Self {
        PrimerDesignResult {
            forward_primer: forward.formatted(),
            forward_primer_details: PrimerDetails::from(&forward),
            reverse_primer: reverse.formatted(),
            reverse_primer_details: PrimerDetails::from(&reverse),
            overall_notes: OVERALL_NOTES.to_string(),
            forward,
            reverse,
        }
    }

    pub fn candidate(&self, orientation: Orientation) -> &PrimerCandidate {
        match orientation {
            Orientation::Forward => &self.forward,
            Orientation::Reverse => &self.reverse,
        }
    }
}

/**
 * Design a forward primer at the start and a reverse primer at the end of
 * `cds_sequence`, each tailed with its restriction site.
 *
 * Both searches read the full CDS.
 */
pub fn design_primers(
    cds_sequence: &str,
    forward_enzyme_site: &str,
    reverse_enzyme_site: &str,
    criteria: &DesignCriteria,
) -> Result<PrimerDesignResult> {
    if cds_sequence.is_empty() {
        return Err(PrimerError::EmptySequence);
    }
    let forward_site = forward_enzyme_site.to_uppercase();
    let reverse_site = reverse_enzyme_site.to_uppercase();

    let (forward, reverse) = rayon::join(
        || find_optimal_primer(cds_sequence, Orientation::Forward, &forward_site, criteria),
        || find_optimal_primer(cds_sequence, Orientation::Reverse, &reverse_site, criteria),
    );
    Ok(PrimerDesignResult::new(forward?, reverse?))
}
