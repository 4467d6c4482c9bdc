#[macro_use]
extern crate num_derive;
extern crate num_traits;

use std::{io, process};

use clap::Parser;

use rsrock::common::debug_log::DebugLog;
use rsrock::interpreted::runfile::{render_error, run, RunConfig};

pub mod rsrock;

fn main() {
    let config = RunConfig::parse();
    let source = config.load_source().unwrap_or_else(|message| {
        eprintln!("{}", message);
        process::exit(1);
    });
    let mut log = DebugLog::stderr(config.debug);
    if let Err(errors) = run(&source, io::stdin().lock(), io::stdout(), &mut log) {
        for error in errors {
            eprintln!("{}", render_error(&*error, &source));
        }
        process::exit(1);
    }
}
