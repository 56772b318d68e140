use crate::design::PrimerDesignResult;
use crate::error::Result;
use crate::primer::Orientation;
use serde::Serialize;
use std::io::Write;

/// Design result tagged with the name of the record it was designed for.
#[derive(Debug, Serialize)]
pub struct NamedDesign {
    pub name: String,
    #[serde(flatten)]
    pub result: PrimerDesignResult,
}

pub fn write_csv<W: Write>(writer: W, designs: &[NamedDesign]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "name",
        "direction",
        "primer",
        "binding_part",
        "length",
        "gc",
        "tm",
        "meets_criteria",
        "deviation",
        "notes",
    ])?;
    for design in designs {
        for orientation in [Orientation::Forward, Orientation::Reverse] {
            let primer = design.result.candidate(orientation);
            writer.write_record([
                design.name.as_str(),
                orientation.code(),
                primer.formatted().as_str(),
                primer.binding_part.as_str(),
                primer.binding_length.to_string().as_str(),
                format!("{:.2}", primer.gc_percent).as_str(),
                format!("{:.2}", primer.tm_celsius).as_str(),
                primer.meets_all_criteria().to_string().as_str(),
                format!("{:.4}", primer.deviation_score).as_str(),
                primer.notes(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, designs: &[NamedDesign]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, designs)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
