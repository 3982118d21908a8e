//! Evaluates flat arithmetic expressions against an operator table supplied
//! at runtime. Each operator names its symbol, the action it performs, a
//! priority and an associativity.
//!
//! ```
//! let value = calc_table::evaluate("( 3 + 4 ) * 2", "+ + 1 L\n* * 2 L".as_bytes()).unwrap();
//! assert_eq!(value, 14.0);
//! ```

#![allow(nonstandard_style)]

pub mod error_handling;
pub mod evaluating;
pub mod loading;
pub mod scanning;
pub mod validating;

pub use error_handling::{CalcError, Result};
pub use loading::{Action, Associativity, Operator, OperatorTable};

use std::io::Read;

/// Loads the operator table from `source`, then validates and evaluates
/// `expression` with it. An empty or all-space expression is 0 whatever the
/// source holds.
pub fn evaluate<R: Read>(expression: &str, source: R) -> Result<f64> {
    if is_blank(expression) {
        return Ok(0.0);
    }
    let operators = OperatorTable::from_reader(source)?;
    evaluate_with_table(expression, &operators)
}

pub fn evaluate_with_table(expression: &str, operators: &OperatorTable) -> Result<f64> {
    if is_blank(expression) {
        return Ok(0.0);
    }
    validating::validate(expression, operators)?;
    evaluating::run(expression, operators)
}

fn is_blank(expression: &str) -> bool {
    expression.chars().all(|c| c == ' ')
}
