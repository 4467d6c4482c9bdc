pub mod debug_log;
pub mod error;
pub mod lexer;
pub mod strings;
#[cfg(test)]
pub mod tests;
pub mod token_cursor;
pub mod utils;
