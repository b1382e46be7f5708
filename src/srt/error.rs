use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrtError {
    #[error("parse error at line {line}: expected an integer subtitle ID number")]
    InvalidId { line: u32 },

    #[error("parse error at line {line}: expected a start/end timespan of the form HH:MM:SS,mmm --> HH:MM:SS,mmm")]
    InvalidTimespan { line: u32 },

    #[error("previous error on this stream; cannot resume")]
    PreviousError,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
