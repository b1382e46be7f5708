use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result, bail};

use crate::cli::InterpolateArgs;
use crate::srt::{SrtReader, SrtWriter};
use crate::timing::AnchorSet;
use crate::timing::anchors::parse_anchor_spec;
use crate::ui::prelude::{Level, emit};

pub fn handle_interpolate(args: InterpolateArgs) -> Result<()> {
    let mut anchor_set = AnchorSet::default();
    for token in &args.anchors {
        anchor_set.insert(parse_anchor_spec(token)?);
    }

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {} for reading", args.input.display()))?;
    let mut reader = SrtReader::new(BufReader::new(input));

    // The interpolation needs two passes over the records: one to discover
    // the anchors' original times and one to transform. Buffer the decoded
    // sequence instead of seeking the source; record counts in this domain
    // are modest.
    let subtitles = reader
        .read_all()
        .with_context(|| format!("Error reading {}", args.input.display()))?;

    let (table, warnings) = anchor_set.resolve(&subtitles);
    for warning in &warnings {
        emit(Level::Warn, "interpolate.anchors", warning, None);
    }
    if table.is_empty() {
        bail!(
            "none of the requested anchor IDs were found in {}",
            args.input.display()
        );
    }

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to open {} for writing", args.output.display()))?;
    let mut writer = SrtWriter::new(BufWriter::new(output));
    if let Some(delimiter) = reader.delimiter() {
        writer.set_delimiter(delimiter);
    }

    for mut subtitle in subtitles {
        let Some((start, end)) = table.retime(&subtitle) else {
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
