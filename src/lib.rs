pub mod api;
pub mod ast;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod utils;
mod serialization;

pub use api::{parse_and_register, parse_definition, DefinitionKind};
pub use error::{EncodingError, GcppError, GrammarError};
pub use serialization::DeclarationSummary;
