use crate::config::DesignCriteria;
use crate::constants::{LENGTH_PENALTY_WEIGHT, NOTE_BEST_EFFORT, NOTE_NOT_FOUND, NOTE_OPTIMAL};
use crate::error::{PrimerError, Result};
use crate::sequence::{gc_percent, reverse_complement, round2};
use crate::tm::calculate_tm_with;
use itertools::Itertools;
use std::ops::RangeInclusive;

/// Strand a primer is designed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Anneals to the start of the CDS, reads along the given strand.
    Forward,
    /// Anneals to the end of the CDS, reads along the complementary strand.
    Reverse,
}

impl Orientation {
    pub fn code(&self) -> &'static str {
        match self {
            Orientation::Forward => "F",
            Orientation::Reverse => "R",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateStatus {
    Optimal,
    BestEffort,
    NotFound,
}

impl CandidateStatus {
    pub fn note(&self) -> &'static str {
        match self {
            CandidateStatus::Optimal => NOTE_OPTIMAL,
            CandidateStatus::BestEffort => NOTE_BEST_EFFORT,
            CandidateStatus::NotFound => NOTE_NOT_FOUND,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrimerCandidate {
    pub binding_part: String,
    pub full_primer: String,
    pub binding_length: usize,
    pub gc_percent: f64,
    pub tm_celsius: f64,
    pub deviation_score: f64,
    pub status: CandidateStatus,
}

impl PrimerCandidate {
    pub fn not_found() -> PrimerCandidate {
        PrimerCandidate {
            binding_part: String::new(),
            full_primer: String::new(),
            binding_length: 0,
            gc_percent: 0.0,
            tm_celsius: 0.0,
            deviation_score: 0.0,
            status: CandidateStatus::NotFound,
        }
    }

    pub fn meets_all_criteria(&self) -> bool {
        self.status == CandidateStatus::Optimal
    }

    pub fn notes(&self) -> &'static str {
        self.status.note()
    }

    /// Full primer written 5'->3', e.g. `5'-GAATTCATG...-3'`.
    pub fn formatted(&self) -> String {
        format!("5'-{}-3'", self.full_primer)
    }
}

struct Score {
    meets_all: bool,
    deviation: f64,
}

fn distance_to_bounds(value: f64, range: &RangeInclusive<f64>) -> f64 {
    (value - range.start()).abs().min((value - range.end()).abs())
}

/**
 * Length term of the deviation score.
 *
 * Lengths are only ever drawn from `criteria.length_range`, so this is 0 for
 * every candidate the search produces.
 */
pub fn length_penalty(criteria: &DesignCriteria, length: usize) -> f64 {
    if criteria.length_range.contains(&length) {
        return 0.0;
    }
    let below = length.abs_diff(*criteria.length_range.start());
    let above = length.abs_diff(*criteria.length_range.end());
    LENGTH_PENALTY_WEIGHT * below.min(above) as f64
}

/**
 * Sum of the distances to the nearest bound of every range that is missed.
 */
pub fn deviation_score(criteria: &DesignCriteria, length: usize, gc: f64, tm: f64) -> f64 {
    let mut deviation = length_penalty(criteria, length);
    if !criteria.gc_range.contains(&gc) {
        deviation += distance_to_bounds(gc, &criteria.gc_range);
    }
    if !criteria.tm_range.contains(&tm) {
        deviation += distance_to_bounds(tm, &criteria.tm_range);
    }
    deviation
}

fn score(criteria: &DesignCriteria, length: usize, gc: f64, tm: f64) -> Score {
    let length_ok = criteria.length_range.contains(&length);
    let gc_ok = criteria.gc_range.contains(&gc);
    let tm_ok = criteria.tm_range.contains(&tm);
    Score {
        meets_all: length_ok && gc_ok && tm_ok,
        deviation: deviation_score(criteria, length, gc, tm),
    }
}

fn first_non_ascii(sequence: &str) -> Option<(usize, char)> {
    sequence.chars().find_position(|c| !c.is_ascii())
}

/**
 * Map an invalid base found in `site + binding` back to the input it came from.
 *
 * Reverse binding parts read the target backwards, so offset `i` of the
 * binding part sits at `target_len - 1 - i` of the target.
 */
fn locate_invalid_base(
    error: PrimerError,
    orientation: Orientation,
    site_len: usize,
    target_len: usize,
) -> PrimerError {
    match error {
        PrimerError::InvalidBase { base, position } if position < site_len => {
            PrimerError::InvalidSite { base, position }
        }
        PrimerError::InvalidBase { base, position } => {
            let offset = position - site_len;
            let position = match orientation {
                Orientation::Forward => offset,
                Orientation::Reverse => target_len - 1 - offset,
            };
            PrimerError::InvalidBase { base, position }
        }
        other => other,
    }
}

fn binding_region(target: &str, orientation: Orientation, length: usize) -> String {
    match orientation {
        Orientation::Forward => target[..length].to_string(),
        Orientation::Reverse => reverse_complement(&target[target.len() - length..]),
    }
}

/**
 * Search primer lengths in ascending order and return the first candidate
 * meeting every range, or else the candidate with the lowest deviation score.
 *
 * Ties keep the shorter candidate. When the target is shorter than every
 * allowed length the not-found sentinel is returned. Invalid bases are
 * reported at their offset in `target_sequence` (or in `enzyme_site`).
 */
pub fn find_optimal_primer(
    target_sequence: &str,
    orientation: Orientation,
    enzyme_site: &str,
    criteria: &DesignCriteria,
) -> Result<PrimerCandidate> {
    let target = target_sequence.to_ascii_uppercase();
    let site = enzyme_site.to_ascii_uppercase();
    if let Some((position, base)) = first_non_ascii(&target) {
        return Err(PrimerError::InvalidBase { base, position });
    }
    if let Some((position, base)) = first_non_ascii(&site) {
        return Err(PrimerError::InvalidSite { base, position });
    }
    let conditions = criteria.thermo();

    let mut best: Option<PrimerCandidate> = None;
    for length in criteria.length_range.clone() {
        // lengths ascend, nothing longer fits either
        if target.len() < length {
            log::trace!(
                "{}: target has {} nt, stopping at length {}",
                orientation.code(),
                target.len(),
                length
            );
            break;
        }
        let binding_part = binding_region(&target, orientation, length);
        let full_primer = format!("{}{}", site, binding_part);
        let gc = gc_percent(&full_primer);
        let tm = calculate_tm_with(&full_primer, &conditions)
            .map_err(|e| locate_invalid_base(e, orientation, site.len(), target.len()))?;
        let score = score(criteria, length, gc, tm);
        log::trace!(
            "{}: length={} primer={} gc={:.2} tm={:.2} deviation={:.4}",
            orientation.code(),
            length,
            full_primer,
            gc,
            tm,
            score.deviation
        );

        if score.meets_all {
            log::debug!("{}: accepted {} at length {}", orientation.code(), full_primer, length);
            return Ok(PrimerCandidate {
                binding_part,
                full_primer,
                binding_length: length,
                gc_percent: round2(gc),
                tm_celsius: round2(tm),
                deviation_score: 0.0,
                status: CandidateStatus::Optimal,
            });
        }

        if best
            .as_ref()
            .is_none_or(|b| score.deviation < b.deviation_score)
        {
            best = Some(PrimerCandidate {
                binding_part,
                full_primer,
                binding_length: length,
                gc_percent: round2(gc),
                tm_celsius: round2(tm),
                deviation_score: score.deviation,
                status: CandidateStatus::BestEffort,
            });
        }
    }

    match best {
        Some(candidate) => {
            log::debug!(
                "{}: no candidate meets all criteria, best effort {} (deviation {:.4})",
                orientation.code(),
                candidate.full_primer,
                candidate.deviation_score
            );
            Ok(candidate)
        }
        None => {
            log::debug!(
                "{}: target of {} nt is shorter than every allowed length",
                orientation.code(),
                target.len()
            );
            Ok(PrimerCandidate::not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 18 nt prefix already passes with EcoRI, as does every longer prefix
    const ENGINEERED: &str = "ATGAGCGATCGCACCGGTCTGAAGCAGCTG";
    // 18 nt prefix misses the Tm range, 19 nt passes
    const LATE_FIT: &str = "ATGCGTCAGCTGAAGCTGCAGGAGAAGCTG";
    const GFP_HEAD: &str = "ATGGCTAGCAAAGGAGAAGAACTTTTCACTGGAGTTGTCCC";
    const GFP_TAIL: &str = "ACACATGGCATGGATGAACTATACAAATAA";
    const AT_RICH: &str = "TTTTATAATTCAGAATTTTTGAGACTTATGTTAATATAAA";

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {:.4}, got {:.4}",
            expected,
            actual
        );
    }

    #[test]
    fn test_first_length_wins() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(ENGINEERED, Orientation::Forward, "GAATTC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 18);
        assert_eq!(primer.binding_part, "ATGAGCGATCGCACCGGT");
        assert_eq!(primer.full_primer, "GAATTCATGAGCGATCGCACCGGT");
        assert_eq!(primer.gc_percent, 54.17);
        assert_eq!(primer.tm_celsius, 59.95);
        assert!(primer.meets_all_criteria());
        assert_eq!(primer.deviation_score, 0.0);
        assert_eq!(primer.notes(), "Optimal primer found within specified criteria.");

        for length in 19..=25 {
            let full = format!("GAATTC{}", &ENGINEERED[..length]);
            let gc = gc_percent(&full);
            let tm = calculate_tm_with(&full, &criteria.thermo()).unwrap();
            assert!(criteria.gc_range.contains(&gc), "gc {} at length {}", gc, length);
            assert!(criteria.tm_range.contains(&tm), "tm {} at length {}", tm, length);
        }
    }

    #[test]
    fn test_skips_failing_shorter_length() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(LATE_FIT, Orientation::Forward, "GAATTC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 19);
        assert_eq!(primer.binding_part, "ATGCGTCAGCTGAAGCTGC");
        assert_eq!(primer.gc_percent, 52.0);
        assert_eq!(primer.tm_celsius, 59.46);
        assert!(primer.meets_all_criteria());
    }

    #[test]
    fn test_best_effort_forward() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(GFP_HEAD, Orientation::Forward, "GAATTC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 24);
        assert_eq!(primer.binding_part, "ATGGCTAGCAAAGGAGAAGAACTT");
        assert_eq!(primer.gc_percent, 40.0);
        assert_eq!(primer.tm_celsius, 57.79);
        assert!(!primer.meets_all_criteria());
        assert_eq!(primer.status, CandidateStatus::BestEffort);
        assert_close(primer.deviation_score, 0.2099, 1e-3);
        assert_eq!(
            primer.notes(),
            "Best effort primer found, but not all criteria met."
        );
    }

    #[test]
    fn test_best_effort_reverse() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(GFP_TAIL, Orientation::Reverse, "GGATCC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 24);
        assert_eq!(primer.binding_part, "TTATTTGTATAGTTCATCCATGCC");
        assert_eq!(primer.full_primer, "GGATCCTTATTTGTATAGTTCATCCATGCC");
        assert_eq!(primer.tm_celsius, 55.97);
        assert_close(primer.deviation_score, 2.0280, 1e-3);
    }

    #[test]
    fn test_low_gc_deviation_is_gc_shortfall() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(AT_RICH, Orientation::Forward, "GCGGCCGC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 25);
        assert_eq!(primer.gc_percent, 39.39);
        assert_eq!(primer.tm_celsius, 59.83);
        assert!(!primer.meets_all_criteria());
        assert_close(
            primer.deviation_score,
            criteria.gc_range.start() - primer.gc_percent,
            0.01,
        );

        for length in criteria.length_range.clone() {
            let full = format!("GCGGCCGC{}", &AT_RICH[..length]);
            let gc = gc_percent(&full);
            assert!(gc < 40.0);
            let tm = calculate_tm_with(&full, &criteria.thermo()).unwrap();
            assert!(deviation_score(&criteria, length, gc, tm) >= primer.deviation_score);
        }
    }

    #[test]
    fn test_short_target_returns_sentinel() {
        let criteria = DesignCriteria::default();
        for orientation in [Orientation::Forward, Orientation::Reverse] {
            let primer = find_optimal_primer("ATGGCTAGCA", orientation, "GAATTC", &criteria)
                .unwrap();
            assert_eq!(primer, PrimerCandidate::not_found());
            assert_eq!(primer.binding_part, "");
            assert_eq!(primer.binding_length, 0);
            assert_eq!(
                primer.notes(),
                "Could not find any suitable primer within the given constraints."
            );
        }
    }

    #[test]
    fn test_alternate_criteria() {
        let criteria = DesignCriteria {
            tm_range: 0.0..=100.0,
            ..Default::default()
        };
        let target = "A".repeat(30);
        let primer =
            find_optimal_primer(&target, Orientation::Forward, "GAATTC", &criteria).unwrap();
        assert_eq!(primer.binding_length, 18);
        assert_eq!(primer.gc_percent, 8.33);
        assert_eq!(primer.tm_celsius, 42.56);
        assert_close(primer.deviation_score, 31.6667, 1e-3);
    }

    #[test]
    fn test_ties_keep_shorter_candidate() {
        let criteria = DesignCriteria {
            tm_range: -1000.0..=1000.0,
            ..Default::default()
        };
        let target = "A".repeat(30);
        let primer = find_optimal_primer(&target, Orientation::Forward, "", &criteria).unwrap();
        assert_eq!(primer.binding_length, 18);
        assert_eq!(primer.deviation_score, 40.0);
    }

    #[test]
    fn test_length_penalty() {
        let criteria = DesignCriteria::default();
        assert_eq!(length_penalty(&criteria, 20), 0.0);
        assert_eq!(length_penalty(&criteria, 30), 10.0);
        assert_eq!(length_penalty(&criteria, 15), 6.0);
        assert_eq!(deviation_score(&criteria, 30, 50.0, 60.0), 10.0);
    }

    #[test]
    fn test_forward_is_prefix() {
        let criteria = DesignCriteria::default();
        for target in [ENGINEERED, LATE_FIT, GFP_HEAD, AT_RICH] {
            let primer =
                find_optimal_primer(target, Orientation::Forward, "GAATTC", &criteria).unwrap();
            assert!(target.starts_with(&primer.binding_part));
            assert_eq!(primer.full_primer, format!("GAATTC{}", primer.binding_part));
            assert!(criteria.length_range.contains(&primer.binding_length));
        }
    }

    #[test]
    fn test_reverse_is_suffix_complement() {
        let criteria = DesignCriteria::default();
        for target in [ENGINEERED, LATE_FIT, GFP_TAIL, AT_RICH] {
            let primer =
                find_optimal_primer(target, Orientation::Reverse, "GGATCC", &criteria).unwrap();
            let suffix = reverse_complement(&primer.binding_part);
            assert!(target.ends_with(&suffix));
            assert_eq!(reverse_complement(&suffix), primer.binding_part);
            assert_eq!(primer.full_primer, format!("GGATCC{}", primer.binding_part));
        }
    }

    #[test]
    fn test_lowercase_site_is_uppercased() {
        let criteria = DesignCriteria::default();
        let primer =
            find_optimal_primer(ENGINEERED, Orientation::Forward, "gaattc", &criteria).unwrap();
        assert_eq!(primer.full_primer, "GAATTCATGAGCGATCGCACCGGT");
    }

    #[test]
    fn test_invalid_base_in_binding_region() {
        let criteria = DesignCriteria::default();
        let result = find_optimal_primer(
            "ATGNGCGATCGCACCGGTCTGAAG",
            Orientation::Forward,
            "GAATTC",
            &criteria,
        );
        assert!(matches!(
            result,
            Err(PrimerError::InvalidBase {
                base: 'N',
                position: 3
            })
        ));
    }

    #[test]
    fn test_invalid_base_reverse_position() {
        let criteria = DesignCriteria::default();
        let target = "ATGAGCGATCGCACCGGTCTGAAGCAGNTG";
        let result = find_optimal_primer(target, Orientation::Reverse, "GGATCC", &criteria);
        assert!(matches!(
            result,
            Err(PrimerError::InvalidBase {
                base: 'N',
                position: 27
            })
        ));
    }

    #[test]
    fn test_invalid_base_in_site() {
        let criteria = DesignCriteria::default();
        let result = find_optimal_primer(ENGINEERED, Orientation::Forward, "GANTTC", &criteria);
        assert!(matches!(
            result,
            Err(PrimerError::InvalidSite {
                base: 'N',
                position: 2
            })
        ));
    }

    #[test]
    fn test_non_ascii_position_is_char_offset() {
        let criteria = DesignCriteria::default();
        let result =
            find_optimal_primer("ÅÅTGAGCGATCGCACCGGTCTG", Orientation::Forward, "", &criteria);
        assert!(matches!(
            result,
            Err(PrimerError::InvalidBase {
                base: 'Å',
                position: 0
            })
        ));
        let result =
            find_optimal_primer("AÅTGAGCGATCGCACCGGTCTG", Orientation::Forward, "", &criteria);
        assert!(matches!(
            result,
            Err(PrimerError::InvalidBase {
                base: 'Å',
                position: 1
            })
        ));
    }

    #[test]
    fn test_unbounded_length_range_stops_at_target_end() {
        let criteria = DesignCriteria {
            length_range: 18..=usize::MAX,
            ..Default::default()
        };
        assert!(criteria.validate().is_ok());
        let primer =
            find_optimal_primer(AT_RICH, Orientation::Forward, "GCGGCCGC", &criteria).unwrap();
        assert!(primer.binding_length <= AT_RICH.len());
        assert!(AT_RICH.starts_with(&primer.binding_part));

        let primer = find_optimal_primer("ATGGCTAGCA", Orientation::Reverse, "GGATCC", &criteria)
            .unwrap();
        assert_eq!(primer, PrimerCandidate::not_found());
    }
}
