mod error;
mod reader;
mod subtitle;
pub mod timestamp;
mod writer;

pub use error::SrtError;
pub use reader::SrtReader;
pub use subtitle::Subtitle;
pub use writer::SrtWriter;

/// Line terminator convention, fixed per stream rather than per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Unix-style `\n`
    Lf,
    /// Windows-style `\r\n`, the SRT default
    CrLf,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Lf => "\n",
            Delimiter::CrLf => "\r\n",
        }
    }
}
