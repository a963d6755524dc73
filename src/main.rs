use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::WriteStyle;
use interval_map_cli::cmd::{Demo, Fuzz, Run};
use log::LevelFilter;

/// Command-line driver for canonical interval maps.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enables debug logs.
    #[arg(long, short)]
    debug: bool,

    /// Forces colored output.
    #[arg(long, short)]
    force_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Demo(Demo),
    Run(Run),
    Fuzz(Fuzz),
}

impl Command {
    fn run(&self) -> Result<()> {
        match self {
            Command::Demo(demo) => demo.run(),
            Command::Run(run) => run.run(),
            Command::Fuzz(fuzz) => fuzz.run(),
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let level = if args.debug { LevelFilter::Debug } else { LevelFilter::Info };
    let write_style = if args.force_color { WriteStyle::Always } else { WriteStyle::Auto };
    env_logger::builder().filter_level(level).write_style(write_style).init();

    args.command.run()
}
