use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result};

use crate::cli::RenumberArgs;
use crate::srt::{SrtReader, SrtWriter};

pub fn handle_renumber(args: RenumberArgs) -> Result<()> {
    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {} for reading", args.input.display()))?;
    let mut reader = SrtReader::new(BufReader::new(input));

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to open {} for writing", args.output.display()))?;
    let mut writer = SrtWriter::new(BufWriter::new(output));

    let mut next_id: u32 = 1;
    while let Some(mut subtitle) = reader
        .read_subtitle()
        .with_context(|| format!("Error reading {}", args.input.display()))?
    {
        if let Some(delimiter) = reader.delimiter() {
            writer.set_delimiter(delimiter);
        }
        subtitle.id = next_id;
        next_id += 1;
        writer
            .write_subtitle(&subtitle)
            .with_context(|| format!("Error writing {}", args.output.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Error writing {}", args.output.display()))
}
