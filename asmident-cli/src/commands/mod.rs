pub mod canonical;
pub mod common;
pub mod parse;
