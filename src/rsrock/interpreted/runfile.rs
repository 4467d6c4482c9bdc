use std::fs::read_to_string;
use std::io::{BufRead, Write};

use clap::builder::FalseyValueParser;
use clap::Parser;

use crate::rsrock::common::debug_log::DebugLog;
use crate::rsrock::common::error::{ErrorKind, RockError, RockResult};
use crate::rsrock::common::lexer::{END_ALL_BLOCKS_MARKER, tokenize};
use crate::rsrock::common::strings::{normalize_linebreaks, strip_shebang};
use crate::rsrock::interpreted::interpreter::Interpreter;
use crate::rsrock::interpreted::parser::parse;

/// rsrock runs Rockstar programs, either from files or from code given on the command line.
#[derive(Parser, Debug, PartialEq, Clone)]
#[command(name = "rsrock", version, long_about = None)]
pub struct RunConfig {
    /// Treat the arguments as program text rather than file paths.
    #[arg(short, long)]
    pub eval: bool,

    /// Dump the tokens and the statement tree to stderr.
    #[arg(short, long, env = "RSROCK_DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,

    #[arg(required = true, value_name = "FILE|CODE")]
    pub sources: Vec<String>,
}

impl RunConfig {
    /// The program text to run. Several files are run as one program, each closing its own blocks.
    pub fn load_source(&self) -> Result<String, String> {
        if self.eval {
            return Ok(join_sources(&[self.sources.join("\n")]));
        }
        let contents = self.sources
            .iter()
            .map(|path| read_to_string(path).map_err(|e| format!("Cannot open file {}: {}", path, e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(join_sources(&contents))
    }
}

pub fn join_sources<S: AsRef<str>>(sources: &[S]) -> String {
    let separator = format!("{}\n", END_ALL_BLOCKS_MARKER);
    sources
        .iter()
        .map(|s| normalize_linebreaks(strip_shebang(s.as_ref())))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

pub fn run<R: BufRead, W: Write, L: Write>(
    source: &str, input: R, output: W, log: &mut DebugLog<L>,
) -> RockResult<()> {
    log.header("Tokenizing");
    let tokens = tokenize(source)?;
    log.dump(&tokens);
    log.header("Parsing");
    let tree = parse(&tokens)?;
    log.log(&tree.pretty_print());
    log.header("Executing");
    Interpreter::new(input, output).execute(&tree)
}

/// A positioned error shows the offending source line with a caret under the column.
pub fn render_error(error: &dyn RockError, source: &str) -> String {
    let stage = match error.kind() {
        ErrorKind::Lexical => "Lexical",
        ErrorKind::Parse => "Parse",
        ErrorKind::Runtime => "Runtime",
    };
    match error.get_info() {
        None => format!("{} error: {}", stage, error.get_message()),
        Some(info) => {
            let line = source.lines().nth(info.line.saturating_sub(1)).unwrap_or("");
            format!(
                "{} error on line {}, column {}: {}\n{}\n{}^",
                stage,
                info.line,
                info.column,
                error.get_message(),
                line,
                " ".repeat(info.column.saturating_sub(1)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use clap::error::ErrorKind as ArgErrorKind;

    use crate::assert_msg_contains;
    use crate::rsrock::interpreted::tests::{run_with_input, unsafe_run};

    use super::*;

    fn config(args: &[&str]) -> Result<RunConfig, clap::Error> {
        RunConfig::try_parse_from(["rsrock"].iter().chain(args))
    }

    fn rendered_errors(source: &str) -> Vec<String> {
        let mut log = DebugLog::new(false, Vec::new());
        run(source, Cursor::new(""), Vec::new(), &mut log)
            .unwrap_err()
            .into_iter()
            .map(|e| render_error(&*e, source))
            .collect()
    }

    fn sources(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_from_args() {
        assert_eq!(
            config(&["--debug", "a.rock", "b.rock"]).unwrap(),
            RunConfig { eval: false, debug: true, sources: sources(&["a.rock", "b.rock"]) },
        );
        assert_eq!(
            config(&["-e", "-d", "Say 1"]).unwrap(),
            RunConfig { eval: true, debug: true, sources: sources(&["Say 1"]) },
        );
    }

    #[test]
    fn bad_args_are_rejected() {
        assert_eq!(config(&[]).unwrap_err().kind(), ArgErrorKind::MissingRequiredArgument);
        assert_eq!(config(&["--eval"]).unwrap_err().kind(), ArgErrorKind::MissingRequiredArgument);
        assert_eq!(config(&["--loud", "x"]).unwrap_err().kind(), ArgErrorKind::UnknownArgument);
    }

    #[test]
    fn eval_fragments_are_lines() {
        let config = config(&["--eval", "Say 1", "Say 2"]).unwrap();
        assert_eq!(config.load_source(), Ok("Say 1\nSay 2\n".to_owned()));
    }

    #[test]
    fn missing_files_are_reported() {
        let config = config(&["/nonexistent/song.rock"]).unwrap();
        assert_msg_contains!(config.load_source().unwrap_err(), "Cannot open file /nonexistent/song.rock");
    }

    #[test]
    fn sources_are_normalized_and_joined() {
        assert_eq!(
            join_sources(&["#!/usr/bin/env rsrock\r\nSay 1", "Say 2\r"]),
            "Say 1\n⏎\nSay 2\n",
        );
    }

    #[test]
    fn joined_sources_close_their_blocks() {
        let source = join_sources(&["If false\nSay 1", "Say 2"]);
        let mut output = Vec::new();
        run(&source, Cursor::new(""), &mut output, &mut DebugLog::new(false, Vec::new())).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "2\n");
    }

    #[test]
    fn debug_log_follows_the_pipeline() {
        let mut log = DebugLog::new(true, Vec::new());
        run("Say 1\n", Cursor::new(""), Vec::new(), &mut log).unwrap();
        let written = String::from_utf8(log.into_writer()).unwrap();
        assert_msg_contains!(written, "===== Tokenizing =====");
        assert_msg_contains!(written, "===== Parsing =====");
        assert_msg_contains!(written, "output (\n\t1)");
        assert_msg_contains!(written, "===== Executing =====");
    }

    #[test]
    fn parse_errors_point_at_the_source() {
        assert_eq!(
            rendered_errors("Say 1\nPut 2 into\n"),
            vec!["Parse error on line 2, column 7: Unexpected end of line after 'into'\nPut 2 into\n      ^"],
        );
    }

    #[test]
    fn lexical_errors_point_at_the_source() {
        let errors = rendered_errors("Say \"oh no\n");
        assert_eq!(errors.len(), 1);
        assert_msg_contains!(errors[0], "Lexical error on line 1, column 5");
        assert_msg_contains!(errors[0], "\n    ^");
    }

    #[test]
    fn runtime_errors_have_no_position() {
        assert_eq!(rendered_errors("Put 1 over 0 into X\n"), vec!["Runtime error: Division by zero"]);
    }

    #[test]
    fn oversized_repetition_is_a_runtime_error() {
        let errors = rendered_errors("Put \"ab\" times 10000000000000000000 into X\n");
        assert_eq!(errors.len(), 1);
        assert_msg_contains!(errors[0], "Runtime error: Cannot repeat a string");
    }

    #[test]
    fn fizzbuzz() {
        let output = unsafe_run(vec![
            "Midnight takes your heart and your soul",
            "While your heart is as high as your soul",
            "Put your heart minus your soul into your heart",
            "",
            "Give back your heart",
            "",
            "Desire is 15",
            "My world is nothing",
            "Fire is ice",
            "Hate is water",
            "Until my world is Desire,",
            "Build my world up",
            "If Midnight taking my world, Fire is nothing and Midnight taking my world, Hate is nothing",
            "Shout \"FizzBuzz!\"",
            "Take it to the top",
            "",
            "If Midnight taking my world, Fire is nothing",
            "Shout \"Fizz!\"",
            "Take it to the top",
            "",
            "If Midnight taking my world, Hate is nothing",
            "Say \"Buzz!\"",
            "Take it to the top",
            "",
            "Whisper my world",
        ]);
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                "1", "2", "Fizz!", "4", "Buzz!", "Fizz!", "7", "8", "Fizz!", "Buzz!", "11", "Fizz!", "13",
                "14", "FizzBuzz!",
            ],
        );
    }

    #[test]
    fn break_stops_the_loop_cleanly() {
        let output = unsafe_run(vec![
            "My counter is 0",
            "While my counter is lower than 5",
            "Build my counter up",
            "Say my counter",
            "If my counter is 2",
            "Break",
            "",
            "",
            "Say \"after\"",
        ]);
        assert_eq!(output, "1\n2\nafter\n");
    }

    #[test]
    fn missing_parameters_print_mysterious() {
        let output = unsafe_run(vec![
            "Echo takes X and Y",
            "Say X",
            "Say Y",
            "",
            "Echo taking 1",
        ]);
        assert_eq!(output, "1\nmysterious\n");
    }

    #[test]
    fn listening_reads_lines() {
        let output = run_with_input(
            vec![
                "Listen to your name",
                "Say \"Hello \" plus your name",
                "Listen to the number",
                "Say the number times 2",
            ],
            "Tommy\n21\n",
        );
        assert_eq!(output, "Hello Tommy\n42\n");
    }

    #[test]
    fn string_repetition_and_equality() {
        let output = unsafe_run(vec![
            "Put \"na\" times 4 into the song",
            "Say the song plus \" Batman\"",
            "If \"yes\" is right",
            "Say \"aliases match\"",
        ]);
        assert_eq!(output, "nananana Batman\naliases match\n");
    }
}
