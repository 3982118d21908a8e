use crate::error_handling::*;
use crate::loading::OperatorTable;
use crate::scanning::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackNode {
    open_paren,
    operator(char),
}

/// The two stacks of the priority-climbing algorithm.
pub struct Yard<'t> {
    operators: &'t OperatorTable,
    operands: Vec<f64>,
    stack: Vec<StackNode>,
}

impl<'t> Yard<'t> {
    pub fn new(operators: &'t OperatorTable) -> Self {
        Self{operators, operands: Vec::new(), stack: Vec::new()}
    }

    fn add_number(&mut self, value: f64) {
        self.operands.push(value);
    }

    fn add_left_paren(&mut self) {
        self.stack.push(StackNode::open_paren);
    }

    /// Reduces everything back to the matching `(` and discards it.
    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(&StackNode::operator(symbol)) = self.stack.last() {
            self.reduce(symbol)?;
        }
        match self.stack.pop() {
            Some(StackNode::open_paren) => Ok(()),
            _ => Err(CalcError::invalid("')' has no matching '('")),
        }
    }

    fn add_operator(&mut self, incoming: char) -> Result<()> {
        while let Some(&StackNode::operator(top)) = self.stack.last() {
            if !self.should_reduce(top, incoming)? {
                break;
            }
            self.reduce(top)?;
        }
        self.stack.push(StackNode::operator(incoming));
        Ok(())
    }

    /// A pending operator is applied before the incoming one when it binds at
    /// least as tightly, unless both share a priority and the incoming one is
    /// right-associative.
    fn should_reduce(&self, top: char, incoming: char) -> Result<bool> {
        let top = self.operators.find(top)?;
        let incoming = self.operators.find(incoming)?;
        if top.priority == incoming.priority {
            Ok(!incoming.is_right_associative())
        } else {
            Ok(top.priority > incoming.priority)
        }
    }

    fn pop_operand(&mut self, symbol: char) -> Result<f64> {
        self.operands
            .pop()
            .ok_or_else(|| CalcError::invalid(format!("the '{symbol}' operator is missing an operand")))
    }

    /// Pops the top operator and applies it to the two topmost operands.
    fn reduce(&mut self, symbol: char) -> Result<()> {
        let operator = *self.operators.find(symbol)?;
        self.stack.pop();
        let right = self.pop_operand(symbol)?;
        let left = self.pop_operand(symbol)?;
        let result = operator.action.call(left, right);
        log::trace!("{left} {symbol} {right} = {result}");
        self.operands.push(result);
        Ok(())
    }

    pub fn finish(mut self) -> Result<f64> {
        while let Some(&node) = self.stack.last() {
            match node {
                StackNode::operator(symbol) => self.reduce(symbol)?,
                StackNode::open_paren => return Err(CalcError::invalid("'(' is never closed")),
            }
        }
        match self.operands.as_slice() {
            [result] => Ok(*result),
            [] => Err(CalcError::invalid("expression has no value")),
            _ => Err(CalcError::invalid("operands are missing an operator")),
        }
    }
}

/// Evaluates an expression that already passed validation against `operators`.
pub fn run(expression: &str, operators: &OperatorTable) -> Result<f64> {
    let scanner = StringScanner::new(expression);
    let mut yard = Yard::new(operators);
    let mut index = scanner.skip_spaces(0);
    let mut expects_operand = true;

    while let Some((token, next)) = scanner.scan(index, expects_operand)? {
        match token {
            Token::number(_) => yard.add_number(token.value()?),
            Token::open_paren => yard.add_left_paren(),
            Token::close_paren => yard.add_right_paren()?,
            Token::symbol(symbol) => yard.add_operator(symbol)?,
        }
        expects_operand = !matches!(token, Token::number(_) | Token::close_paren);
        index = scanner.skip_spaces(next);
    }
    yard.finish()
}
