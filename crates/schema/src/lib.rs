#[macro_use]
mod table;
mod normalizer;
mod records;
mod sql;


pub use normalizer::*;
pub use records::*;
pub use sql::*;
