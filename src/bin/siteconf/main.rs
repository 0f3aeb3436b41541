use clap::Parser;

mod args;
mod check;
mod debug;
mod error;

use crate::error::*;

/// Validate and inspect static site settings
#[derive(Debug, clap::Parser)]
#[command(name = "siteconf", version, about, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Load the settings and report whether they are valid
    Check(check::CheckArgs),

    /// Print resolved settings
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Self::Check(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    args::init_logging(cli.verbose.log_level_filter());

    cli.command.run().map_err(|err| {
        proc_exit::Exit::new(proc_exit::sysexits::CONFIG_ERR).with_message(format!("{err:#}"))
    })
}
