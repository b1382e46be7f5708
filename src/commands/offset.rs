use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result};

use crate::cli::OffsetArgs;
use crate::srt::{SrtReader, SrtWriter};
use crate::timing::LinearRetime;

pub fn handle_offset(args: OffsetArgs) -> Result<()> {
    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {} for reading", args.input.display()))?;
    let mut reader = SrtReader::new(BufReader::new(input));

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to open {} for writing", args.output.display()))?;
    let mut writer = SrtWriter::new(BufWriter::new(output));

    let retime = LinearRetime::from_factor_and_translation(args.factor, args.translate);

    while let Some(mut subtitle) = reader
        .read_subtitle()
        .with_context(|| format!("Error reading {}", args.input.display()))?
    {
        if let Some(delimiter) = reader.delimiter() {
            writer.set_delimiter(delimiter);
        }
        let Some((start, end)) = retime.retime(&subtitle) else {
            // Pushed entirely before the stream origin; drop the record.
            continue;
        };
        subtitle.start = start;
        subtitle.end = end;
        writer
            .write_subtitle(&subtitle)
            .with_context(|| format!("Error writing {}", args.output.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Error writing {}", args.output.display()))
}
