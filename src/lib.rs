pub mod config;
pub mod constants;
pub mod design;
pub mod error;
pub mod nn_params;
pub mod output;
pub mod primer;
pub mod sequence;
pub mod tm;

pub use config::DesignCriteria;
pub use design::{PrimerDesignResult, PrimerDetails, design_primers};
pub use error::PrimerError;
pub use primer::{CandidateStatus, Orientation, PrimerCandidate, find_optimal_primer};
pub use tm::{ThermoConditions, calculate_tm};
