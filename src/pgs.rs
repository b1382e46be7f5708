//! PGS (Presentation Graphic Stream) segment scanning.
//!
//! A PGS stream is a sequence of segments, each a 1-byte type tag and a
//! 2-byte big-endian payload length followed by the payload. The scanner
//! tallies forced subtitle objects inside presentation composition
//! segments; all other segment types only need to be stepped over.

use std::io::Read;

use bytes::Buf;
use thiserror::Error;

use crate::ring::{RingBuffer, RingError};

pub const PALETTE_SEGMENT: u8 = 0x14;
pub const PICTURE_SEGMENT: u8 = 0x15;
pub const PRESENTATION_SEGMENT: u8 = 0x16;
pub const WINDOW_SEGMENT: u8 = 0x17;
pub const DISPLAY_SEGMENT: u8 = 0x80;

/// Default scan buffer size; segment payloads are at most 65535 bytes, so
/// this always fits one segment.
pub const DEFAULT_BUFFER_SIZE: usize = 65536;

const HEADER_LEN: usize = 3;
const COMPOSITION_OBJECT_LEN: usize = 8;
const FORCED_FLAG: u8 = 0x40;

#[derive(Error, Debug)]
pub enum PgsError {
    #[error("segment of length {length} does not fit the {capacity}-byte buffer; try a larger buffer")]
    SegmentTooLarge { length: usize, capacity: usize },

    #[error("stream ended inside a segment of length {length}")]
    Truncated { length: usize },

    #[error(
        "inconsistent presentation segment: header announces {expected} composition objects, data present for {actual}"
    )]
    InconsistentPresentation { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A segment the scanner did not recognize; surfaced so the caller can
/// report it without aborting the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSegment {
    pub kind: u8,
    pub length: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Composition objects carrying the forced flag.
    pub forced_objects: u32,
    /// Presentation segments containing at least one forced object.
    pub forced_presentations: u32,
    /// Presentation segments seen in total.
    pub presentations: u32,
    pub unknown_segments: Vec<UnknownSegment>,
}

/// Scans a PGS stream, tallying forced objects per presentation segment.
///
/// Drives the ring buffer the way its API intends: top up, try an exact
/// extract, and retry on [`RingError::InsufficientData`] until either the
/// extract succeeds or the source is exhausted.
pub fn scan_forced<R: Read>(source: &mut R, buffer_size: usize) -> Result<ScanOutcome, PgsError> {
    let mut ring = RingBuffer::with_capacity(buffer_size);
    let mut scratch = vec![0u8; buffer_size];
    let mut outcome = ScanOutcome::default();

    loop {
        let fill = ring.fill(source)?;

        let mut header = [0u8; HEADER_LEN];
        match ring.extract_exact(&mut header) {
            Ok(()) => {}
            Err(RingError::InsufficientData) => {
                if fill.short_read {
                    // End of stream; anything shorter than a header left in
                    // the buffer is trailing padding.
                    break;
                }
                continue;
            }
            Err(RingError::ExceedsCapacity { requested, capacity }) => {
                return Err(PgsError::SegmentTooLarge {
                    length: requested,
                    capacity,
                });
            }
        }

        let mut cursor = &header[..];
        let kind = cursor.get_u8();
        let length = cursor.get_u16() as usize;

        if length > ring.capacity() {
            return Err(PgsError::SegmentTooLarge {
                length,
                capacity: ring.capacity(),
            });
        }

        let payload = &mut scratch[..length];
        loop {
            match ring.extract_exact(payload) {
                Ok(()) => break,
                Err(RingError::InsufficientData) => {
                    let fill = ring.fill(source)?;
                    if fill.short_read && ring.fill_level() < length {
                        return Err(PgsError::Truncated { length });
                    }
                }
                Err(RingError::ExceedsCapacity { requested, capacity }) => {
                    return Err(PgsError::SegmentTooLarge {
                        length: requested,
                        capacity,
                    });
                }
            }
        }

        match kind {
            PRESENTATION_SEGMENT => {
                let forced = count_forced_objects(payload)?;
                outcome.presentations += 1;
                outcome.forced_objects += forced;
                if forced > 0 {
                    outcome.forced_presentations += 1;
                }
            }
            PALETTE_SEGMENT | PICTURE_SEGMENT | WINDOW_SEGMENT | DISPLAY_SEGMENT => {}
            other => outcome.unknown_segments.push(UnknownSegment {
                kind: other,
                length,
            }),
        }
    }

    Ok(outcome)
}

/// Counts forced composition objects in a presentation segment payload.
/// The composition object list starts at offset 11; each entry is 8 bytes
/// with the forced flag in bit 6 of its fourth byte.
fn count_forced_objects(payload: &[u8]) -> Result<u32, PgsError> {
    const OBJECT_LIST_OFFSET: usize = 11;

    if payload.len() < OBJECT_LIST_OFFSET {
        return Err(PgsError::InconsistentPresentation {
            expected: 0,
            actual: 0,
        });
    }

    let mut cursor = &payload[..];
    cursor.advance(OBJECT_LIST_OFFSET - 1);
    let expected = cursor.get_u8() as usize;

    if cursor.remaining() != expected * COMPOSITION_OBJECT_LEN {
        return Err(PgsError::InconsistentPresentation {
            expected,
            actual: cursor.remaining() / COMPOSITION_OBJECT_LEN,
        });
    }

    let mut forced = 0;
    for _ in 0..expected {
        cursor.advance(3);
        let flags = cursor.get_u8();
        cursor.advance(COMPOSITION_OBJECT_LEN - 4);
        if flags & FORCED_FLAG != 0 {
            forced += 1;
        }
    }
    Ok(forced)
}
