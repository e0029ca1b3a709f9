use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/**
 * Wall-clock timer that accumulates named splits, written into the
 * diagnostics file alongside each render.
 */
pub struct Stopwatch {
    name: String,
    start_total: Instant,
    start_split: Instant,
    splits: Vec<(String, Duration)>,
}

impl Stopwatch {
    pub fn new(name: &str) -> Stopwatch {
        let now = Instant::now();
        Stopwatch {
            name: name.to_owned(),
            start_total: now,
            start_split: now,
            splits: Vec::new(),
        }
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start_total.elapsed()
    }

    /// Close the current split and start the next one.
    pub fn record_split(&mut self, name: &str) -> Duration {
        let duration = self.start_split.elapsed();
        self.start_split = Instant::now();
        self.splits.push((name.to_owned(), duration));
        duration
    }

    pub fn display<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(
            writer,
            "Stopwatch: {};  Total elapsed duration: {:?}",
            self.name,
            self.total_elapsed()
        )?;
        for (name, duration) in self.splits.iter() {
            writeln!(writer, "  {}: {:?}", name, duration)?;
        }
        Ok(())
    }
}
