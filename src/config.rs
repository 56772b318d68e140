pub(crate) use crate::constants::{
    DNA_CONC, FORMAT_CSV, FORMAT_JSON, MV_CONC, PRIMER_MAX_GC, PRIMER_MAX_LEN, PRIMER_MAX_TM,
    PRIMER_MIN_GC, PRIMER_MIN_LEN, PRIMER_MIN_TM,
};
use crate::error::{PrimerError, Result};
use crate::tm::ThermoConditions;
use std::ops::RangeInclusive;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Design restriction-site tailed PCR primers for a CDS", long_about=None)]
pub struct Args {
    #[arg(
        short,
        long,
        required_unless_present = "sequence",
        conflicts_with = "sequence",
        help = "FASTA file holding one or more coding sequences."
    )]
    pub input: Option<String>,

    #[arg(long, env = "CDS_SEQUENCE", help = "Raw CDS sequence, used instead of --input.")]
    pub sequence: Option<String>,

    #[arg(short, long, help = "Output file, stdout when omitted.")]
    pub output: Option<String>,

    #[arg(
        long,
        env = "OUTPUT_FORMAT",
        default_value = FORMAT_CSV,
        value_parser = [FORMAT_CSV, FORMAT_JSON]
    )]
    pub format: String,

    #[arg(long, env = "FORWARD_SITE", help = "Recognition site prepended to the forward primer.")]
    pub forward_site: String,
    #[arg(long, env = "REVERSE_SITE", help = "Recognition site prepended to the reverse primer.")]
    pub reverse_site: String,

    #[arg(long, env = "MIN_LEN", default_value_t = PRIMER_MIN_LEN)]
    pub min_len: usize,
    #[arg(long, env = "MAX_LEN", default_value_t = PRIMER_MAX_LEN)]
    pub max_len: usize,
    #[arg(long, env = "MIN_GC", default_value_t = PRIMER_MIN_GC)]
    pub min_gc: f64,
    #[arg(long, env = "MAX_GC", default_value_t = PRIMER_MAX_GC)]
    pub max_gc: f64,
    #[arg(long, env = "MIN_TM", default_value_t = PRIMER_MIN_TM)]
    pub min_tm: f64,
    #[arg(long, env = "MAX_TM", default_value_t = PRIMER_MAX_TM)]
    pub max_tm: f64,
    #[arg(long, env = "MV_CONC", default_value_t = MV_CONC, help = "Monovalent cation concentration (mM)")]
    pub mv_conc: f64,
    #[arg(long, env = "DNA_CONC", default_value_t = DNA_CONC, help = "Primer concentration per strand (nM)")]
    pub dna_conc: f64,
}

impl Args {
    pub fn criteria(&self) -> Result<DesignCriteria> {
        let criteria = DesignCriteria {
            length_range: self.min_len..=self.max_len,
            gc_range: self.min_gc..=self.max_gc,
            tm_range: self.min_tm..=self.max_tm,
            mv_conc: self.mv_conc,
            dna_conc: self.dna_conc,
        };
        criteria.validate()?;
        Ok(criteria)
    }
}

/// Acceptance ranges and reaction conditions used by the primer search.
#[derive(Clone, Debug, PartialEq)]
pub struct DesignCriteria {
    /// Binding length in bases, the restriction site is not counted.
    pub length_range: RangeInclusive<usize>,
    /// GC content of the full primer, in percent.
    pub gc_range: RangeInclusive<f64>,
    /// Tm of the full primer, in °C.
    pub tm_range: RangeInclusive<f64>,
    pub mv_conc: f64,
    pub dna_conc: f64,
}

impl Default for DesignCriteria {
    fn default() -> Self {
        DesignCriteria {
            length_range: PRIMER_MIN_LEN..=PRIMER_MAX_LEN,
            gc_range: PRIMER_MIN_GC..=PRIMER_MAX_GC,
            tm_range: PRIMER_MIN_TM..=PRIMER_MAX_TM,
            mv_conc: MV_CONC,
            dna_conc: DNA_CONC,
        }
    }
}

impl DesignCriteria {
    pub fn validate(&self) -> Result<()> {
        if *self.length_range.start() == 0 {
            return Err(PrimerError::InvalidCriteria(
                "minimum primer length must be at least 1".to_string(),
            ));
        }
        if self.length_range.is_empty() {
            return Err(PrimerError::InvalidCriteria(format!(
                "length range {}..={} is empty",
                self.length_range.start(),
                self.length_range.end()
            )));
        }
        if self.gc_range.is_empty() {
            return Err(PrimerError::InvalidCriteria(format!(
                "GC range {}..={} is empty",
                self.gc_range.start(),
                self.gc_range.end()
            )));
        }
        if self.tm_range.is_empty() {
            return Err(PrimerError::InvalidCriteria(format!(
                "Tm range {}..={} is empty",
                self.tm_range.start(),
                self.tm_range.end()
            )));
        }
        // written so NaN is rejected too
        if !(self.mv_conc > 0.0) || !(self.dna_conc > 0.0) {
            return Err(PrimerError::InvalidCriteria(
                "cation and primer concentrations must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn thermo(&self) -> ThermoConditions {
        ThermoConditions {
            mv_conc: self.mv_conc,
            dna_conc: self.dna_conc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria() {
        let criteria = DesignCriteria::default();
        assert_eq!(criteria.length_range, 18..=25);
        assert_eq!(criteria.gc_range, 40.0..=60.0);
        assert_eq!(criteria.tm_range, 58.0..=65.0);
        assert_eq!(criteria.mv_conc, 50.0);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_ranges() {
        let criteria = DesignCriteria {
            length_range: 25..=18,
            ..Default::default()
        };
        assert!(matches!(
            criteria.validate(),
            Err(PrimerError::InvalidCriteria(_))
        ));

        let criteria = DesignCriteria {
            tm_range: 65.0..=58.0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = DesignCriteria {
            length_range: 0..=10,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_salt() {
        let criteria = DesignCriteria {
            mv_conc: 0.0,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = DesignCriteria {
            mv_conc: f64::NAN,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = DesignCriteria {
            dna_conc: f64::NAN,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_args_criteria() {
        let args = Args::parse_from([
            "od-cds-primer",
            "--sequence",
            "ATGAAA",
            "--forward-site",
            "GAATTC",
            "--reverse-site",
            "GGATCC",
            "--min-tm",
            "55",
        ]);
        let criteria = args.criteria().unwrap();
        assert_eq!(criteria.tm_range, 55.0..=65.0);
        assert_eq!(criteria.length_range, 18..=25);
        assert_eq!(args.format, "csv");
    }
}
