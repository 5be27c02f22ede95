//! Parser for the S-expression schematic grammar

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::Node;
pub use grammar::parse;
