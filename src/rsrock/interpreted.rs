pub mod ast;
pub mod builder;
pub mod interpreter;
pub mod keywords;
pub mod parser;
pub mod runfile;
#[cfg(test)]
mod tests;
