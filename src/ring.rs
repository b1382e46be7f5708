//! Fixed-capacity circular byte buffer.
//!
//! Decouples "top up from a streaming source" from "take exactly N bytes",
//! which is what a length-prefixed segment reader needs: it can keep
//! retrying `fill` + `extract_exact` until the extract stops reporting
//! [`RingError::InsufficientData`], and a request no amount of filling could
//! ever satisfy is distinguished as [`RingError::ExceedsCapacity`].

use std::io::{self, Read};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    #[error("not enough data buffered yet")]
    InsufficientData,

    #[error("request for {requested} bytes exceeds the buffer capacity of {capacity}")]
    ExceedsCapacity { requested: usize, capacity: usize },
}

/// Result of a [`RingBuffer::fill`] call. `short_read` is set when the
/// source produced fewer bytes than the free space requested, letting the
/// caller tell "stream exhausted, drain what's buffered" from "more data
/// pending".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    pub bytes_read: usize,
    pub short_read: bool,
}

/// The backing store holds one byte more than the capacity so the empty and
/// full states stay distinguishable from the cursors alone.
pub struct RingBuffer {
    buf: Vec<u8>,
    start: usize,
    end: usize,
}

impl RingBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity + 1],
            start: 0,
            end: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len() - 1
    }

    /// Number of bytes currently buffered.
    pub fn fill_level(&self) -> usize {
        if self.end >= self.start {
            self.end - self.start
        } else {
            self.buf.len() - (self.start - self.end)
        }
    }

    /// Appends whatever the source currently makes available, up to the free
    /// capacity. Performs at most one read per contiguous free span (two
    /// when the free region wraps around the end of the backing store) and
    /// never blocks beyond what the source itself does.
    pub fn fill<R: Read>(&mut self, source: &mut R) -> io::Result<FillOutcome> {
        let mut total = 0;

        if self.start <= self.end {
            // Free space runs to the end of the store, minus the slack byte
            // when the start cursor sits at index 0.
            let limit = if self.start == 0 {
                self.buf.len() - 1
            } else {
                self.buf.len()
            };
            let span = limit - self.end;
            if span > 0 {
                let read = source.read(&mut self.buf[self.end..self.end + span])?;
                self.end += read;
                if self.end >= self.buf.len() {
                    self.end -= self.buf.len();
                }
                total += read;
                if read < span {
                    return Ok(FillOutcome {
                        bytes_read: total,
                        short_read: true,
                    });
                }
            }
        }

        // A single contiguous free region remains, ending one byte short of
        // the start cursor.
        let span = (self.start as isize - self.end as isize - 1).max(0) as usize;
        if span == 0 {
            return Ok(FillOutcome {
                bytes_read: total,
                short_read: false,
            });
        }
        let read = source.read(&mut self.buf[self.end..self.end + span])?;
        self.end += read;
        total += read;
        Ok(FillOutcome {
            bytes_read: total,
            short_read: read < span,
        })
    }

    fn check_available(&self, requested: usize) -> Result<(), RingError> {
        if self.fill_level() < requested {
            if requested > self.capacity() {
                return Err(RingError::ExceedsCapacity {
                    requested,
                    capacity: self.capacity(),
                });
            }
            return Err(RingError::InsufficientData);
        }
        Ok(())
    }

    /// Copies exactly `dest.len()` bytes out of the buffer and consumes
    /// them. On failure the buffer is left unmodified.
    pub fn extract_exact(&mut self, dest: &mut [u8]) -> Result<(), RingError> {
        let len = dest.len();
        self.check_available(len)?;

        if self.start + len > self.buf.len() {
            // Wraps: copy the tail of the store, then the head.
            let first = self.buf.len() - self.start;
            dest[..first].copy_from_slice(&self.buf[self.start..]);
            dest[first..].copy_from_slice(&self.buf[..len - first]);
            self.start = len - first;
        } else {
            dest.copy_from_slice(&self.buf[self.start..self.start + len]);
            self.start += len;
            if self.start >= self.buf.len() {
                self.start -= self.buf.len();
            }
        }
        Ok(())
    }

    /// Discards the next `len` bytes; same failure contract as
    /// [`RingBuffer::extract_exact`].
    pub fn skip(&mut self, len: usize) -> Result<(), RingError> {
        self.check_available(len)?;
        self.start += len;
        if self.start >= self.buf.len() {
            self.start -= self.buf.len();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn fill_then_extract_round_trips_bytes() {
        let mut ring = RingBuffer::with_capacity(8);
        let mut src = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let outcome = ring.fill(&mut src).expect("fill");
        assert_eq!(outcome.bytes_read, 5);
        assert!(outcome.short_read);
        assert_eq!(ring.fill_level(), 5);

        let mut out = [0u8; 5];
        ring.extract_exact(&mut out).expect("extract");
        assert_eq!(out, [1, 2, 3, 4, 5]);
        assert_eq!(ring.fill_level(), 0);
    }

    #[test]
    fn insufficient_data_leaves_buffer_unmodified() {
        let mut ring = RingBuffer::with_capacity(8);
        let mut src = Cursor::new(vec![9u8, 9, 9]);
        ring.fill(&mut src).expect("fill");

        let mut out = [0u8; 5];
        assert_eq!(
            ring.extract_exact(&mut out),
            Err(RingError::InsufficientData)
        );
        assert_eq!(ring.fill_level(), 3);
    }

    #[test]
    fn oversized_request_is_a_capacity_error() {
        let mut ring = RingBuffer::with_capacity(4);
        let mut out = [0u8; 5];
        assert_eq!(
            ring.extract_exact(&mut out),
            Err(RingError::ExceedsCapacity {
                requested: 5,
                capacity: 4
            })
        );
    }

    #[test]
    fn never_holds_more_than_capacity() {
        let mut ring = RingBuffer::with_capacity(4);
        let mut src = Cursor::new(vec![0u8; 100]);
        let outcome = ring.fill(&mut src).expect("fill");
        assert_eq!(outcome.bytes_read, 4);
        assert!(!outcome.short_read);
        assert_eq!(ring.fill_level(), 4);
    }

    #[test]
    fn extract_across_the_wrap_point() {
        let mut ring = RingBuffer::with_capacity(4);
        let mut src = Cursor::new(vec![1u8, 2, 3, 4]);
        ring.fill(&mut src).expect("fill");

        let mut out = [0u8; 3];
        ring.extract_exact(&mut out).expect("extract");
        assert_eq!(out, [1, 2, 3]);

        // Refill so the live region wraps around the end of the store.
        let mut src = Cursor::new(vec![5u8, 6, 7]);
        ring.fill(&mut src).expect("refill");
        assert_eq!(ring.fill_level(), 4);

        let mut out = [0u8; 4];
        ring.extract_exact(&mut out).expect("extract wrap");
        assert_eq!(out, [4, 5, 6, 7]);
    }

    #[test]
    fn skip_consumes_without_copying() {
        let mut ring = RingBuffer::with_capacity(8);
        let mut src = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        ring.fill(&mut src).expect("fill");

        ring.skip(2).expect("skip");
        assert_eq!(ring.fill_level(), 3);
        let mut out = [0u8; 3];
        ring.extract_exact(&mut out).expect("extract");
        assert_eq!(out, [3, 4, 5]);

        assert_eq!(ring.skip(1), Err(RingError::InsufficientData));
        assert_eq!(
            ring.skip(9),
            Err(RingError::ExceedsCapacity {
                requested: 9,
                capacity: 8
            })
        );
    }

    #[test]
    fn fill_resumes_after_drain() {
        let mut ring = RingBuffer::with_capacity(3);
        let data: Vec<u8> = (0..10).collect();
        let mut src = Cursor::new(data.clone());
        let mut drained = Vec::new();

        loop {
            let outcome = ring.fill(&mut src).expect("fill");
            let mut byte = [0u8; 1];
            match ring.extract_exact(&mut byte) {
                Ok(()) => drained.push(byte[0]),
                Err(RingError::InsufficientData) => {
                    if outcome.short_read && ring.fill_level() == 0 {
                        break;
                    }
                }
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert_eq!(drained, data);
    }
}
