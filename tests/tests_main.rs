#[path = "parser/mod.rs"]
mod parser;
