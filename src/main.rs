use clap::Parser;

use subutil::cli::Cli;
use subutil::commands::handle_command;
use subutil::ui::prelude::{Level, OutputFormat, emit, init};
use subutil::ui::set_debug_mode;

fn main() {
    let cli = Cli::parse();

    init(
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        true,
    );
    set_debug_mode(cli.debug);

    if let Err(error) = handle_command(cli.command, cli.debug) {
        emit(Level::Error, "subutil.error", &format!("{error:#}"), None);
        std::process::exit(1);
    }
}
