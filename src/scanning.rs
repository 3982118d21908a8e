use crate::error_handling::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    /// Digits with an optional leading `-`.
    number(&'a str),
    open_paren,
    close_paren,
    /// Anything else, to be looked up in the operator table.
    symbol(char),
}

impl Token<'_> {
    pub fn value(&self) -> Result<f64> {
        match self {
            Token::number(content) => content
                .parse()
                .map_err(|_| CalcError::invalid(format!("'{content}' is not a valid number"))),
            _ => Err(CalcError::invalid("expected a number")),
        }
    }
}

/// Splits an expression into tokens without owning a position. Every call
/// takes a byte index and hands back the index just past the token.
pub struct StringScanner<'a> {
    string: &'a str,
}

impl<'a> StringScanner<'a> {
    pub fn new(string: &'a str) -> Self {
        Self{string}
    }

    fn view(&self, index: usize) -> &'a str {
        &self.string[index..]
    }

    fn count_digits(&self, index: usize) -> usize {
        self.view(index).chars().take_while(char::is_ascii_digit).count()
    }

    pub fn skip_spaces(&self, index: usize) -> usize {
        index + self.view(index).chars().take_while(|&c| c == ' ').count()
    }

    /// A token must be followed by a space or the end of the expression.
    pub fn is_separated(&self, index: usize) -> bool {
        matches!(self.view(index).chars().next(), None | Some(' '))
    }

    /// Reads the token starting at `index`, which must not be a space.
    ///
    /// A `-` begins a negative number only where an operand is expected,
    /// otherwise it is an operator symbol like any other.
    pub fn scan(&self, index: usize, expects_operand: bool) -> Result<Option<(Token<'a>, usize)>> {
        let Some(current) = self.view(index).chars().next() else {
            return Ok(None);
        };

        let token = match current {
            '0'..='9' => {
                let end = index + self.count_digits(index);
                (Token::number(&self.string[index..end]), end)
            },
            '-' if expects_operand => {
                let digits = self.count_digits(index + 1);
                if digits == 0 {
                    return Err(CalcError::invalid("'-' must be directly followed by a digit"));
                }
                let end = index + 1 + digits;
                (Token::number(&self.string[index..end]), end)
            },
            '(' => (Token::open_paren, index + 1),
            ')' => (Token::close_paren, index + 1),
            c => (Token::symbol(c), index + c.len_utf8()),
        };
        Ok(Some(token))
    }
}
