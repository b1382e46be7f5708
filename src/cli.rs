use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// subutil main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Emit machine-readable JSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shift and/or scale every subtitle timestamp by a constant amount
    Offset(OffsetArgs),
    /// Retime subtitles so the given IDs land on the given target times
    Interpolate(InterpolateArgs),
    /// Rewrite subtitle IDs to run from 1 to the number of subtitles
    Renumber(RenumberArgs),
    /// Tally forced subtitles in a PGS stream
    Forced(ForcedArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OffsetArgs {
    /// Input SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Seconds to add to each timestamp; negative moves subtitles sooner
    #[arg(
        short = 't',
        long = "translate",
        default_value_t = 0.0,
        allow_negative_numbers = true
    )]
    pub translate: f64,

    /// Multiplicative factor applied to each timestamp, before any translation
    #[arg(short = 'f', long = "factor", default_value_t = 1.0)]
    pub factor: f64,
}

#[derive(Args, Debug, Clone)]
pub struct InterpolateArgs {
    /// Anchor point as id,time where time is [[H:]MM:]SS[.mmm]; repeatable
    #[arg(short = 'a', long = "anchor", required = true)]
    pub anchors: Vec<String>,

    /// Input SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RenumberArgs {
    /// Input SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output SRT file
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ForcedArgs {
    /// Input PGS file
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Scan buffer size in bytes; must fit the largest segment
    #[arg(long, default_value_t = crate::pgs::DEFAULT_BUFFER_SIZE)]
    pub buffer_size: usize,
}
