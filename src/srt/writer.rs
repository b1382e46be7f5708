use std::io::Write;

use super::timestamp;
use super::{Delimiter, SrtError, Subtitle};

/// Streaming SRT encoder.
///
/// Writes records with the configured delimiter, defaulting to CRLF as the
/// format expects; readers hand their detected delimiter over via
/// [`SrtWriter::set_delimiter`] so round trips keep the input convention.
/// A failed write poisons the handle; the sink keeps whatever it committed
/// before the failing call.
pub struct SrtWriter<W> {
    sink: W,
    delimiter: Delimiter,
    failed: bool,
}

impl<W: Write> SrtWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            delimiter: Delimiter::CrLf,
            failed: false,
        }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        self.delimiter = delimiter;
    }

    fn write_str(&mut self, s: &str) -> Result<(), SrtError> {
        if let Err(err) = self.sink.write_all(s.as_bytes()) {
            self.failed = true;
            return Err(err.into());
        }
        Ok(())
    }

    /// Writes one record: ID line, timespan line, payload with embedded
    /// newlines converted to the stream delimiter (bare carriage returns
    /// dropped), then exactly one blank separator line.
    pub fn write_subtitle(&mut self, subtitle: &Subtitle) -> Result<(), SrtError> {
        if self.failed {
            return Err(SrtError::PreviousError);
        }

        let delim = self.delimiter.as_str();

        let header = format!(
            "{id}{delim}{start} --> {end}{delim}",
            id = subtitle.id,
            start = timestamp::format(subtitle.start),
            end = timestamp::format(subtitle.end),
        );
        self.write_str(&header)?;

        let mut body = String::with_capacity(subtitle.text.len() + delim.len() * 2);
        for ch in subtitle.text.chars() {
            match ch {
                '\n' => body.push_str(delim),
                '\r' => {}
                other => body.push(other),
            }
        }
        if !subtitle.text.ends_with('\n') {
            body.push_str(delim);
        }
        // Blank line terminating the record.
        body.push_str(delim);
        self.write_str(&body)
    }

    pub fn flush(&mut self) -> Result<(), SrtError> {
        if let Err(err) = self.sink.flush() {
            self.failed = true;
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(writer_setup: impl FnOnce(&mut SrtWriter<Vec<u8>>), subtitle: &Subtitle) -> String {
        let mut writer = SrtWriter::new(Vec::new());
        writer_setup(&mut writer);
        writer.write_subtitle(subtitle).expect("write");
        String::from_utf8(writer.sink).expect("utf8")
    }

    #[test]
    fn defaults_to_crlf() {
        let out = encode(|_| {}, &Subtitle::new(1, 5000, 7000, "Hello"));
        assert_eq!(
            out,
            "1\r\n00:00:05,000 --> 00:00:07,000\r\nHello\r\n\r\n"
        );
    }

    #[test]
    fn lf_round_trip_matches_input_bytes() {
        let input = "1\n00:00:05,000 --> 00:00:07,000\nHello\n\n";
        let out = encode(
            |w| w.set_delimiter(Delimiter::Lf),
            &Subtitle::new(1, 5000, 7000, "Hello"),
        );
        assert_eq!(out, input);
    }

    #[test]
    fn embedded_newlines_use_the_stream_delimiter() {
        let out = encode(
            |_| {},
            &Subtitle::new(2, 0, 1000, "one\ntwo"),
        );
        assert!(out.ends_with("one\r\ntwo\r\n\r\n"));
    }

    #[test]
    fn embedded_carriage_returns_are_dropped() {
        let out = encode(
            |w| w.set_delimiter(Delimiter::Lf),
            &Subtitle::new(2, 0, 1000, "one\r\ntwo"),
        );
        assert!(out.ends_with("one\ntwo\n\n"));
    }

    #[test]
    fn empty_payload_still_gets_a_blank_record() {
        let out = encode(
            |w| w.set_delimiter(Delimiter::Lf),
            &Subtitle::new(3, 1000, 2000, ""),
        );
        assert_eq!(out, "3\n00:00:01,000 --> 00:00:02,000\n\n\n");
    }

    #[test]
    fn payload_with_trailing_newline_is_not_doubled() {
        let out = encode(
            |w| w.set_delimiter(Delimiter::Lf),
            &Subtitle::new(4, 0, 500, "line\n"),
        );
        assert_eq!(out, "4\n00:00:00,000 --> 00:00:00,500\nline\n\n");
    }
}
