use std::fs::File;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::ForcedArgs;
use crate::pgs::scan_forced;
use crate::ui::prelude::{Level, emit};

pub fn handle_forced(args: ForcedArgs) -> Result<()> {
    let mut input = File::open(&args.input)
        .with_context(|| format!("Failed to open {} for reading", args.input.display()))?;

    let outcome = scan_forced(&mut input, args.buffer_size)
        .with_context(|| format!("Error scanning {}", args.input.display()))?;

    for segment in &outcome.unknown_segments {
        emit(
            Level::Warn,
            "forced.unknown_segment",
            &format!(
                "Unknown segment 0x{kind:02x}, length {length}",
                kind = segment.kind,
                length = segment.length
            ),
            None,
        );
    }

    emit(
        Level::Info,
        "forced.total",
        &format!(
            "TOTAL: {objects} forced objects in {presentations} presentation segments",
            objects = outcome.forced_objects,
            presentations = outcome.forced_presentations
        ),
        Some(json!({
            "forced_objects": outcome.forced_objects,
            "forced_presentations": outcome.forced_presentations,
            "presentations": outcome.presentations,
        })),
    );

    Ok(())
}
