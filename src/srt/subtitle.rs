/// A single timed subtitle record.
///
/// Timestamps are in milliseconds from the start of the stream. The text
/// payload holds the caption lines joined with `\n` and may be empty for a
/// blank caption. Each decoded record is independently owned; nothing in it
/// aliases the reader that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtitle {
    /// ID number of the subtitle, unique within a file. Input files need
    /// not number contiguously; tools may rewrite this on output.
    pub id: u32,
    /// When the subtitle appears, in milliseconds.
    pub start: u64,
    /// When the subtitle disappears, in milliseconds.
    pub end: u64,
    /// Caption text, internal lines separated by `\n`, no trailing newline.
    pub text: String,
}

impl Subtitle {
    pub fn new(id: u32, start: u64, end: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            start,
            end,
            text: text.into(),
        }
    }
}
