use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Args;
use interval_map::script::Script;

/// Applies an operation script to a fresh map and prints every lookup.
#[derive(Args)]
pub struct Run {
    /// Path to the operation script.
    #[arg(long, short = 's')]
    pub script_path: PathBuf,

    /// Base value used when the script has no `base` line.
    #[arg(long, short = 'b', default_value = "A")]
    pub base: String,

    /// Prints the final map representation as JSON after the lookups.
    #[arg(long, short = 'j')]
    pub json: bool,
}

impl Run {
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        self.write(&mut stdout.lock())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let script = Script::from_file(&self.script_path)?;
        let output = script.run(&self.base);

        for lookup in &output.lookups {
            writeln!(writer, "{lookup}")?;
        }
        if self.json {
            serde_json::to_writer_pretty(&mut *writer, &output.map)?;
            writeln!(writer)?;
        }

        log::info!(
            "Ran {} operations from '{}', {} change points stored",
            script.operations().len(),
            self.script_path.display(),
            output.map.len()
        );
        Ok(())
    }
}
