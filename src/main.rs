//! CLI entry point for greedy quadtree image approximation

use clap::Parser;
use greedyquads::io::cli::{Cli, FileProcessor};

fn main() -> greedyquads::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
