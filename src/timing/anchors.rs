//! Multi-anchor piecewise-linear retiming.
//!
//! Each anchor ties a subtitle ID to a target timestamp. A first pass over
//! the decoded records discovers each anchor's original start time; from
//! consecutive anchor pairs a local rate (ppm) and offset are derived, and
//! the second pass retimes every record with the coefficients of its
//! governing anchor. The curve is pinned exactly at the anchors and
//! extrapolates beyond the first and last one.

use anyhow::{Context, Result, bail};

use crate::srt::Subtitle;

use super::{clamp_to_origin, parse_clock_time};

/// A caller-supplied control point: subtitle ID plus desired output time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorSpec {
    pub id: u32,
    pub time_final: i64,
}

/// Parses a command-line anchor token `id,time` with time in
/// `[[H:]MM:]SS[.mmm]`.
pub fn parse_anchor_spec(token: &str) -> Result<AnchorSpec> {
    let Some((id_part, time_part)) = token.split_once(',') else {
        bail!("Anchor '{token}' must have the form id,time");
    };
    let id = id_part
        .parse()
        .with_context(|| format!("Invalid subtitle ID in anchor '{token}'"))?;
    let time_final = parse_clock_time(time_part)
        .with_context(|| format!("Invalid time in anchor '{token}'"))?;
    Ok(AnchorSpec { id, time_final })
}

/// Anchor specs ordered by ID, collected before the input is scanned.
/// Consistency problems are recorded as warnings, never corrected: the
/// caller decides whether to proceed.
#[derive(Debug, Default)]
pub struct AnchorSet {
    specs: Vec<AnchorSpec>,
    warnings: Vec<String>,
}

impl AnchorSet {
    /// Insertion-sorts a spec by ID, warning when target times do not
    /// increase monotonically with ID.
    pub fn insert(&mut self, spec: AnchorSpec) {
        let at = self.specs.partition_point(|s| s.id < spec.id);
        if at > 0 && self.specs[at - 1].time_final > spec.time_final {
            self.warnings.push(format!(
                "anchor times should increase monotonically with ID (anchor {})",
                spec.id
            ));
        }
        if at < self.specs.len() && self.specs[at].time_final < spec.time_final {
            self.warnings.push(format!(
                "anchor times should increase monotonically with ID (anchor {})",
                spec.id
            ));
        }
        self.specs.insert(at, spec);
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Discovers each anchor's original start time by scanning the decoded
    /// records once, in ID order, then derives the interpolation
    /// coefficients. Anchors whose ID never appears are reported and
    /// dropped. Returns the table and all accumulated warnings.
    pub fn resolve(self, subtitles: &[Subtitle]) -> (AnchorTable, Vec<String>) {
        let mut warnings = self.warnings;
        let mut anchors: Vec<Anchor> = Vec::with_capacity(self.specs.len());
        let mut records = subtitles.iter();

        for spec in &self.specs {
            match records.by_ref().find(|s| s.id == spec.id) {
                Some(record) => anchors.push(Anchor {
                    id: spec.id,
                    time_initial: record.start as i64,
                    time_final: spec.time_final,
                    ppm: 0,
                    offset: 0,
                }),
                None => warnings.push(format!(
                    "anchor ID {} not found in the input; ignoring it",
                    spec.id
                )),
            }
        }

        for pair in anchors.windows(2) {
            if pair[1].time_initial <= pair[0].time_initial {
                warnings.push(format!(
                    "original times should increase monotonically with ID (anchors {} and {})",
                    pair[0].id, pair[1].id
                ));
            }
        }

        derive_coefficients(&mut anchors);
        (AnchorTable { anchors }, warnings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    id: u32,
    time_initial: i64,
    time_final: i64,
    // Rate and offset governing the interval that ends at this anchor:
    // output(t) = t + ppm*t/1_000_000 + offset.
    ppm: i64,
    offset: i64,
}

fn derive_coefficients(anchors: &mut [Anchor]) {
    match anchors {
        [] => {}
        [only] => {
            // Degenerate single-anchor case: pure translation.
            only.ppm = 0;
            only.offset = only.time_final - only.time_initial;
        }
        _ => {
            for i in 1..anchors.len() {
                let prev = anchors[i - 1];
                let cur = &mut anchors[i];
                let dt_initial = cur.time_initial - prev.time_initial;
                if dt_initial <= 0 {
                    // Non-monotonic initial times were already warned
                    // about; fall back to a pure translation for this
                    // segment rather than dividing by a non-positive span.
                    cur.ppm = 0;
                    cur.offset = cur.time_final - cur.time_initial;
                    continue;
                }
                let dt_final = cur.time_final - prev.time_final;
                let ppm = (dt_final as i128 * 1_000_000) / dt_initial as i128 - 1_000_000;
                cur.ppm = ppm as i64;
                cur.offset = cur.time_final
                    - cur.time_initial
                    - ((ppm * cur.time_initial as i128) / 1_000_000) as i64;
            }
            // The interval before the first anchor borrows the first
            // segment's coefficients.
            anchors[0].ppm = anchors[1].ppm;
            anchors[0].offset = anchors[1].offset;
        }
    }
}

/// Immutable anchor table used by the transform pass.
#[derive(Debug)]
pub struct AnchorTable {
    anchors: Vec<Anchor>,
}

impl AnchorTable {
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// The governing anchor for a record: the first anchor whose original
    /// time is at or after the record's original start, capped at the last
    /// anchor; coefficients describe the interval ending at an anchor, so
    /// this is what interpolates between consecutive anchors and
    /// extrapolates past the ends.
    fn governing(&self, start: i64) -> Option<&Anchor> {
        if self.anchors.is_empty() {
            return None;
        }
        let at = self
            .anchors
            .partition_point(|a| a.time_initial < start)
            .min(self.anchors.len() - 1);
        Some(&self.anchors[at])
    }

    /// Retimes both timestamps of a record with its governing anchor's
    /// coefficients, applying the usual drop/clamp policy at the origin.
    /// With an empty table this is the identity.
    pub fn retime(&self, subtitle: &Subtitle) -> Option<(u64, u64)> {
        let start = subtitle.start as i64;
        let end = subtitle.end as i64;
        let Some(anchor) = self.governing(start) else {
            return clamp_to_origin(start, end);
        };
        let apply = |t: i64| -> i64 {
            t + ((t as i128 * anchor.ppm as i128) / 1_000_000) as i64 + anchor.offset
        };
        clamp_to_origin(apply(start), apply(end))
    }
}
