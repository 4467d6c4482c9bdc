use std::io::Cursor;

use crate::rsrock::common::tests::unsafe_tokenize;
use crate::rsrock::interpreted::builder::tree::Tree;
use crate::rsrock::interpreted::interpreter::Interpreter;
use crate::rsrock::interpreted::parser::parse;

pub fn unsafe_parse(program: Vec<&str>) -> Tree {
    parse(&unsafe_tokenize(program)).expect("Failed to parse")
}

pub fn run_with_input(program: Vec<&str>, input: &str) -> String {
    let tree = unsafe_parse(program);
    let mut interpreter = Interpreter::new(Cursor::new(input.to_owned()), Vec::new());
    interpreter.execute(&tree).expect("Failed to run");
    String::from_utf8(interpreter.into_output()).expect("Output is not UTF-8")
}

pub fn unsafe_run(program: Vec<&str>) -> String {
    run_with_input(program, "")
}
