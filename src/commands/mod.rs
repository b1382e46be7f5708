use anyhow::Result;

use crate::cli::Commands;

mod forced;
mod interpolate;
mod offset;
mod renumber;

pub fn handle_command(command: Commands, _debug: bool) -> Result<()> {
    match command {
        Commands::Offset(args) => offset::handle_offset(args),
        Commands::Interpolate(args) => interpolate::handle_interpolate(args),
        Commands::Renumber(args) => renumber::handle_renumber(args),
        Commands::Forced(args) => forced::handle_forced(args),
    }
}
