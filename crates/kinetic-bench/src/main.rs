// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use clap::Parser;
use kinetic_bench::driver::{self, RunError};
use kinetic_core::time::TimeDelta;
use kinetic_index::engine::TrajectoryIndex;
use kinetic_index::paged::{IndexConfig, PagedIndex};
use kinetic_index::storage::{EvictionBuffer, MemoryStore};
use kinetic_model::record::RecordReader;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when the operation log cannot be opened.
const EXIT_NO_INPUT: u8 = 2;
/// Exit status when a delete finds nothing to remove.
const EXIT_DELETE_FAILED: u8 = 3;

/// Cache pages held in front of the page store.
const BUFFER_CAPACITY: usize = 10;
/// Placement lookahead of the engine, in log time units.
const HORIZON: f64 = 20.0;

#[derive(Debug, Parser)]
#[command(
    name = "kinetic-bench",
    about = "Replays a moving-object operation log against the trajectory index"
)]
struct Args {
    /// Path to the operation log.
    data: PathBuf,
    /// Page fan-out forwarded to the index engine.
    capacity: usize,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    enable_tracing();
    let args = Args::parse();

    // The input must open before any index state exists.
    let file = match File::open(&args.data) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Cannot open data file {}: {}", args.data.display(), error);
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };
    let records = RecordReader::new(BufReader::new(file));

    let mut index = PagedIndex::new(
        EvictionBuffer::new(MemoryStore::new(), BUFFER_CAPACITY),
        IndexConfig::new(args.capacity, TimeDelta::new(HORIZON)),
    );

    let stats = match driver::run(records, &mut index) {
        Ok(stats) => stats,
        Err(RunError::DeleteFailed { id, records }) => {
            eprintln!("Cannot delete {} after {} operations", id, records);
            return ExitCode::from(EXIT_DELETE_FAILED);
        }
    };

    println!("Operations: {}", stats.total_operations());
    println!("{}", index.stats());
    println!("Buffer hits: {}", index.storage().hits());
    println!("Index ID: {}", index.id());
    println!("{}", stats);

    if index.validate() {
        println!("The structure seems O.K.");
    } else {
        // Reported, never a failure exit: the run itself completed.
        println!("ERROR: Structure is invalid!");
    }

    ExitCode::SUCCESS
}
