use anyhow::Context;
use clap::Parser;
use od_cds_primer::config::Args;
use od_cds_primer::constants::FORMAT_JSON;
use od_cds_primer::design::design_primers;
use od_cds_primer::output::{NamedDesign, write_csv, write_json};
use od_cds_primer::sequence::{SequenceRecord, read_fasta};
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn load_records(args: &Args) -> anyhow::Result<Vec<SequenceRecord>> {
    match (&args.input, &args.sequence) {
        (Some(path), _) => read_fasta(path).with_context(|| format!("reading {}", path)),
        (None, Some(sequence)) => Ok(vec![SequenceRecord {
            name: "sequence".to_string(),
            sequence: sequence.trim().to_uppercase(),
        }]),
        (None, None) => anyhow::bail!("either --input or --sequence is required"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::debug!("args: {:?}", args);
    let criteria = args.criteria()?;

    // 1. Load sequences
    log::info!("Reading sequences...");
    let records = load_records(&args)?;
    log::info!(".... DONE, total records: {}", records.len());

    // 2. Design primers for every record
    log::info!(
        "Designing primers, forward site: {}, reverse site: {}",
        args.forward_site.to_uppercase(),
        args.reverse_site.to_uppercase()
    );
    let mut designs = Vec::with_capacity(records.len());
    for record in records {
        let result = design_primers(
            &record.sequence,
            &args.forward_site,
            &args.reverse_site,
            &criteria,
        )
        .with_context(|| format!("designing primers for {}", record.name))?;
        log::info!(
            "{}: forward {} ({}), reverse {} ({})",
            record.name,
            result.forward_primer,
            result.forward.status.note(),
            result.reverse_primer,
            result.reverse.status.note()
        );
        designs.push(NamedDesign {
            name: record.name,
            result,
        });
    }

    // 3. Output the primers
    log::info!("Outputting primers...");
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    if args.format == FORMAT_JSON {
        write_json(writer, &designs)?;
    } else {
        write_csv(writer, &designs)?;
    }
    log::info!("Done outputting primers");

    Ok(())
}
