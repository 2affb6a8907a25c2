//! FILENAME: core/formula/src/lib.rs
//! PURPOSE: Library root for the personalized average formula engine.
//! CONTEXT: Teachers write weighted averages such as `(N1 * 2 + N2 * 3) / 5`
//! where N1..Nk are the averages of a unit's items (or of a class's units)
//! in ordinal order. This crate validates those expressions and evaluates
//! them with a dedicated recursive descent evaluator.
//!
//! PIPELINE: Formula String --> Validator --> Lexer --> Tokens --> Parser --> AST --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, / with the usual precedence
//! - Decimal literals: 2, 0.6, .5
//! - Positional references: N1..Nk
//! - Parentheses for grouping
//! - Unary negation of a literal or reference: -5, -N1

pub mod ast;
pub mod compiled;
pub mod error;
pub mod evaluator;
pub mod formula_spec;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validator;


pub use ast::{BinaryOperator, Expression, UnaryOperator};
pub use compiled::{evaluate, Formula};
pub use error::FormulaError;
pub use evaluator::Evaluator;
pub use formula_spec::FormulaSpec;
pub use lexer::Lexer;
pub use parser::{parse, ParseError, ParseResult, Parser, MAX_NESTING, MAX_OPERATORS};
pub use token::Token;
pub use validator::{references, validate};
