use crate::error::{PrimerError, Result};
use seq_io::fasta::{Reader, Record};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRecord {
    pub name: String,
    pub sequence: String,
}

/// Parse FASTA content into records, with sequences upper-cased and RNA `U` read as `T`.
pub fn to_records<R: Read>(src: R) -> Result<Vec<SequenceRecord>> {
    let mut reader = Reader::new(BufReader::new(src));
    let mut records = Vec::new();

    while let Some(result) = reader.next() {
        let record = result.map_err(|e| PrimerError::Fasta(e.to_string()))?;
        let name = record
            .id()
            .map_err(|e| PrimerError::Fasta(e.to_string()))?
            .to_string();
        let sequence = String::from_utf8_lossy(&record.full_seq())
            .to_uppercase()
            .replace('U', "T");
        records.push(SequenceRecord { name, sequence });
    }
    Ok(records)
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let file = File::open(path.as_ref())?;
    let records = to_records(file)?;
    if records.is_empty() {
        return Err(PrimerError::EmptySequence);
    }
    log::debug!(
        "read {} record(s) from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'U' => 'A',
            'C' => 'G',
            'G' => 'C',
            _ => c,
        })
        .collect()
}

/// GC share of `sequence` in percent, 0 for an empty sequence.
pub fn gc_percent(sequence: &str) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }
    let gc_count = sequence
        .chars()
        .filter(|c| matches!(c, 'G' | 'C' | 'g' | 'c'))
        .count();
    (gc_count as f64 / sequence.len() as f64) * 100.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
