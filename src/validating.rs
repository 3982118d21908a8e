use crate::error_handling::*;
use crate::loading::OperatorTable;
use crate::scanning::*;

/// Checks the structure of `expression` in one pass, failing on the first
/// violation found.
///
/// `operands` counts values waiting for an operator and is always 0 or 1:
/// a number raises it, an operator consumes it. A closed group leaves its
/// value behind, so `)` keeps it at 1.
pub fn validate(expression: &str, operators: &OperatorTable) -> Result<()> {
    let scanner = StringScanner::new(expression);
    let mut operands = 0;
    let mut parens = 0;
    let mut index = scanner.skip_spaces(0);

    while let Some((token, next)) = scanner.scan(index, operands == 0)? {
        match token {
            Token::number(content) => {
                if operands > 0 {
                    return Err(CalcError::invalid(format!("'{content}' follows another operand")));
                }
                operands += 1;
            },
            Token::open_paren => {
                if operands > 0 {
                    return Err(CalcError::invalid("'(' follows an operand"));
                }
                parens += 1;
            },
            Token::close_paren => {
                if operands <= 0 {
                    return Err(CalcError::invalid("')' is missing an operand before it"));
                }
                parens -= 1;
                if parens < 0 {
                    return Err(CalcError::invalid("')' has no matching '('"));
                }
            },
            Token::symbol(symbol) => {
                if !operators.contains(symbol) {
                    return Err(CalcError::invalid(format!("'{symbol}' is not a known operator")));
                }
                if operands <= 0 {
                    return Err(CalcError::invalid(format!("the '{symbol}' operator is missing its left operand")));
                }
                operands -= 1;
            },
        }

        if !scanner.is_separated(next) {
            return Err(CalcError::invalid("tokens must be separated by a space"));
        }
        index = scanner.skip_spaces(next);
    }

    if operands != 1 {
        return Err(CalcError::invalid("expression ended without a final operand"));
    }
    if parens != 0 {
        return Err(CalcError::invalid("'(' is never closed"));
    }
    Ok(())
}
