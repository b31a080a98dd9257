use crate::error::Result;
use molgeom::core::io::StructureFormat;
use std::io::Write;

fn key(format: StructureFormat) -> &'static str {
    match format {
        StructureFormat::Xyz => "xyz",
        StructureFormat::Arc => "arc",
    }
}

pub fn write_formats<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Supported structure formats:")?;
    for format in StructureFormat::ALL {
        writeln!(out, "  {:<5} {}", key(format), format)?;
    }
    Ok(())
}

pub fn run() -> Result<()> {
    write_formats(&mut std::io::stdout().lock())
}
