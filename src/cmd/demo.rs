use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use interval_map::map::IntervalMap;

/// Runs the overlapping-assignment walkthrough and prints the value of each touched key.
#[derive(Args)]
pub struct Demo {
    /// Value of every key before anything is assigned.
    #[arg(long, short = 'b', default_value_t = 'A')]
    pub base: char,
}

impl Demo {
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        self.write(&mut stdout.lock())
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut map = IntervalMap::new(self.base);

        // Plain assignment
        map.assign(1, 5, 'B');
        for key in 1..5 {
            writeln!(writer, "Value at key {key}: {}", map[&key])?;
        }

        // Empty ranges are ignored
        map.assign(5, 5, 'C');
        writeln!(writer, "Value at key 5: {}", map[&5])?;

        // Overlaps the right half of the first range
        map.assign(3, 7, 'D');
        for key in 3..7 {
            writeln!(writer, "Value at key {key}: {}", map[&key])?;
        }

        log::debug!("Demo map has {} change points", map.len());
        Ok(())
    }
}
