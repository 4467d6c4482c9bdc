use std::fmt::Debug;
use std::io;
use std::io::Write;

use crate::rsrock::common::utils::debug_mk_string;

/// Diagnostic output for following a program through the pipeline. Disabled logs write nothing.
/// Failures to write diagnostics are ignored; they must never abort a run.
pub struct DebugLog<W: Write> {
    enabled: bool,
    writer: W,
}

impl DebugLog<io::Stderr> {
    pub fn stderr(enabled: bool) -> Self { DebugLog::new(enabled, io::stderr()) }
}

impl<W: Write> DebugLog<W> {
    pub fn new(enabled: bool, writer: W) -> Self { DebugLog { enabled, writer } }

    /// Delimits a stage of the pipeline.
    pub fn header(&mut self, title: &str) {
        self.log(&format!("===== {} =====\n", title));
    }

    pub fn log(&mut self, message: &str) {
        if self.enabled {
            let _ = writeln!(self.writer, "{}", message);
        }
    }

    pub fn dump<A: Debug>(&mut self, items: &[A]) {
        if self.enabled {
            let _ = writeln!(self.writer, "{}\n", debug_mk_string(items));
        }
    }

    pub fn into_writer(self) -> W { self.writer }
}
