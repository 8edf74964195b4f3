// agentdoc - render structured agent output in the terminal
//
// Reads agent text or a tool payload from a file or stdin and writes styled
// lines (or JSON instructions) to stdout. Logs go to stderr.

use agentdoc::cli::{self, Cli, Commands};
use agentdoc::config::Config;
use agentdoc::logging;
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands run before loading config so a broken file can still be located
    if let Commands::Config(args) = &cli.command {
        return cli::handle_config(args);
    }

    let config = Config::load()?;
    let _log_guard = logging::init_tracing(&config.logging);
    tracing::debug!(theme = %config.theme, width = config.render.width, "loaded config");

    cli::run(cli, &config)
}
