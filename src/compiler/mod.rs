pub mod parser;
pub mod scanner;
pub mod token;

pub use parser::{Parser, parse_expression, parse_program};
pub use scanner::Scanner;
pub use token::{Operator, Symbol, Token};
