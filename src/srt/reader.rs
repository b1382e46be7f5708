use std::io::BufRead;

use lazy_static::lazy_static;
use regex::Regex;

use super::timestamp;
use super::{Delimiter, SrtError, Subtitle};

lazy_static! {
    static ref TIMESPAN_RE: Regex = Regex::new(
        r"^\s*(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})\s*$"
    )
    .expect("timespan regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitIdentifier,
    AwaitTimespan,
    AwaitPayload,
}

/// Streaming SRT decoder.
///
/// Reads one subtitle record at a time from a line-oriented source. The
/// line delimiter convention is detected from the first line and then fixed
/// for the whole stream; tools propagate it to their output writer so a
/// CRLF file stays CRLF.
///
/// Parse errors are terminal: the first one poisons the handle and every
/// later call reports [`SrtError::PreviousError`]. End of stream is not an
/// error; `read_subtitle` returns `Ok(None)`.
pub struct SrtReader<R> {
    source: R,
    delimiter: Option<Delimiter>,
    line_no: u32,
    // Recycled between reads; record text is copied out per subtitle.
    line: String,
    failed: bool,
}

impl<R: BufRead> SrtReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            delimiter: None,
            line_no: 0,
            line: String::new(),
            failed: false,
        }
    }

    /// The detected delimiter, once at least one line has been read.
    pub fn delimiter(&self) -> Option<Delimiter> {
        self.delimiter
    }

    /// 1-based number of the last line read, for diagnostics.
    pub fn line_no(&self) -> u32 {
        self.line_no
    }

    fn fail(&mut self, err: SrtError) -> SrtError {
        self.failed = true;
        err
    }

    /// Reads the next subtitle record, or `Ok(None)` at end of stream.
    pub fn read_subtitle(&mut self) -> Result<Option<Subtitle>, SrtError> {
        if self.failed {
            return Err(SrtError::PreviousError);
        }

        let mut state = State::AwaitIdentifier;
        let mut id: u32 = 0;
        let mut start: u64 = 0;
        let mut end: u64 = 0;
        let mut text = String::new();

        loop {
            self.line.clear();
            let read = match self.source.read_line(&mut self.line) {
                Ok(n) => n,
                Err(err) => return Err(self.fail(err.into())),
            };

            if read == 0 {
                // End of input acts as an implicit trailing blank line.
                return match state {
                    State::AwaitPayload => Ok(Some(Subtitle::new(id, start, end, text))),
                    _ => Ok(None),
                };
            }

            self.line_no += 1;

            if self.delimiter.is_none() {
                self.delimiter = Some(if self.line.ends_with("\r\n") {
                    Delimiter::CrLf
                } else if self.line.ends_with('\n') {
                    Delimiter::Lf
                } else {
                    // Unterminated final line; fall back to the SRT default.
                    Delimiter::CrLf
                });
            }

            let content = strip_terminator(&self.line);

            match state {
                State::AwaitIdentifier => {
                    if content.trim().is_empty() {
                        continue;
                    }
                    id = match content.trim().parse() {
                        Ok(value) => value,
                        Err(_) => {
                            let line = self.line_no;
                            return Err(self.fail(SrtError::InvalidId { line }));
                        }
                    };
                    state = State::AwaitTimespan;
                }
                State::AwaitTimespan => {
                    if content.trim().is_empty() {
                        continue;
                    }
                    let Some(caps) = TIMESPAN_RE.captures(content) else {
                        let line = self.line_no;
                        return Err(self.fail(SrtError::InvalidTimespan { line }));
                    };
                    let field = |i: usize| -> u64 {
                        // The regex guarantees short digit-only captures.
                        caps[i].parse().unwrap_or(0)
                    };
                    start = timestamp::pack(field(1), field(2), field(3), field(4));
                    end = timestamp::pack(field(5), field(6), field(7), field(8));
                    state = State::AwaitPayload;
                }
                State::AwaitPayload => {
                    if content.trim().is_empty() {
                        return Ok(Some(Subtitle::new(id, start, end, text)));
                    }
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(content);
                }
            }
        }
    }

    /// Reads every remaining record into memory. Tools that need more than
    /// one pass over the input (interpolation) buffer the decoded sequence
    /// instead of seeking the underlying source.
    pub fn read_all(&mut self) -> Result<Vec<Subtitle>, SrtError> {
        let mut subtitles = Vec::new();
        while let Some(subtitle) = self.read_subtitle()? {
            subtitles.push(subtitle);
        }
        Ok(subtitles)
    }
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> SrtReader<Cursor<&str>> {
        SrtReader::new(Cursor::new(input))
    }

    #[test]
    fn decodes_a_single_record() {
        let mut r = reader("1\n00:00:05,000 --> 00:00:07,000\nHello\n\n");
        let sub = r.read_subtitle().expect("read").expect("record");
        assert_eq!(sub.id, 1);
        assert_eq!(sub.start, 5000);
        assert_eq!(sub.end, 7000);
        assert_eq!(sub.text, "Hello");
        assert!(r.read_subtitle().expect("read").is_none());
    }

    #[test]
    fn detects_delimiter_from_first_line() {
        let mut lf = reader("1\n00:00:00,000 --> 00:00:01,000\nx\n\n");
        lf.read_subtitle().expect("read");
        assert_eq!(lf.delimiter(), Some(Delimiter::Lf));

        let mut crlf = reader("1\r\n00:00:00,000 --> 00:00:01,000\r\nx\r\n\r\n");
        crlf.read_subtitle().expect("read");
        assert_eq!(crlf.delimiter(), Some(Delimiter::CrLf));
    }

    #[test]
    fn multi_line_payload_is_joined_with_lf() {
        let mut r = reader("7\n00:01:00,000 --> 00:01:02,500\nfirst\nsecond\n\n");
        let sub = r.read_subtitle().expect("read").expect("record");
        assert_eq!(sub.id, 7);
        assert_eq!(sub.text, "first\nsecond");
    }

    #[test]
    fn blank_lines_before_id_and_timespan_are_skipped() {
        let mut r = reader("\n\n3\n\n00:00:01,000 --> 00:00:02,000\nhi\n\n");
        let sub = r.read_subtitle().expect("read").expect("record");
        assert_eq!(sub.id, 3);
        assert_eq!(sub.start, 1000);
    }

    #[test]
    fn record_at_eof_without_trailing_blank_is_returned() {
        let mut r = reader("1\n00:00:01,000 --> 00:00:02,000\nlast line");
        let sub = r.read_subtitle().expect("read").expect("record");
        assert_eq!(sub.text, "last line");
        assert!(r.read_subtitle().expect("read").is_none());
    }

    #[test]
    fn bad_id_line_is_fatal_and_sticky() {
        let mut r = reader("not-a-number\n00:00:01,000 --> 00:00:02,000\nx\n\n");
        match r.read_subtitle() {
            Err(SrtError::InvalidId { line }) => assert_eq!(line, 1),
            other => panic!("expected InvalidId, got {other:?}"),
        }
        assert!(matches!(r.read_subtitle(), Err(SrtError::PreviousError)));
    }

    #[test]
    fn bad_timespan_line_is_fatal() {
        let mut r = reader("1\n00:00:01.000 --> 00:00:02,000\nx\n\n");
        match r.read_subtitle() {
            Err(SrtError::InvalidTimespan { line }) => assert_eq!(line, 2),
            other => panic!("expected InvalidTimespan, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        let mut r = reader("");
        assert!(r.read_subtitle().expect("read").is_none());
    }

    #[test]
    fn read_all_collects_every_record() {
        let mut r = reader(
            "1\n00:00:01,000 --> 00:00:02,000\na\n\n2\n00:00:03,000 --> 00:00:04,000\nb\n\n",
        );
        let subs = r.read_all().expect("read all");
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].id, 1);
        assert_eq!(subs[1].text, "b");
    }
}
