use crate::error_handling::*;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    addition,
    subtraction,
    multiplication,
    division,
    exponentiation,
}

impl Action {
    /// Division by zero and overflow follow `f64` semantics.
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use Action::*;

        match self {
            addition => left + right,
            subtraction => left - right,
            multiplication => left * right,
            division => left / right,
            exponentiation => left.powf(right),
        }
    }

    fn character(&self) -> char {
        use Action::*;
        match self {
            addition => '+',
            subtraction => '-',
            multiplication => '*',
            division => '/',
            exponentiation => '^',
        }
    }
}

impl FromStr for Action {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use Action::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            "^" => Ok(exponentiation),
            _ => Err(CalcError::malformed(format!("'{s}' is not an action"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    left,
    right,
}

impl FromStr for Associativity {
    type Err = CalcError;

    /// `R` is right-associative, any other single character is left-associative.
    fn from_str(s: &str) -> Result<Self> {
        match single_character(s) {
            Some('R') => Ok(Associativity::right),
            Some(_) => Ok(Associativity::left),
            None => Err(CalcError::malformed(format!("'{s}' is not an associativity"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operator {
    pub symbol: char,
    pub action: Action,
    pub priority: i32,
    pub associativity: Associativity,
}

impl Operator {
    pub fn new(symbol: char, action: Action, priority: i32, associativity: Associativity) -> Self {
        Self{symbol, action, priority, associativity}
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        let [symbol, action, priority, associativity] = fields else {
            return Err(CalcError::malformed(format!(
                "expected 4 fields but found {}", fields.len()
            )));
        };

        let symbol = match single_character(symbol) {
            Some(c) if is_reserved(c) => {
                return Err(CalcError::malformed(format!("'{c}' cannot be an operator symbol")))
            },
            Some(c) => c,
            None => return Err(CalcError::malformed(format!("'{symbol}' is not a single character"))),
        };
        let priority = priority.parse().map_err(|_| {
            CalcError::malformed(format!("'{priority}' is not an integer priority"))
        })?;

        Ok(Self::new(symbol, action.parse()?, priority, associativity.parse()?))
    }

    pub fn is_right_associative(&self) -> bool {
        self.associativity == Associativity::right
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_fields(&s.split_whitespace().collect::<Vec<_>>())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let associativity = match self.associativity {
            Associativity::right => 'R',
            Associativity::left => 'L',
        };
        write!(f, "{} {} {} {}", self.symbol, self.action.character(), self.priority, associativity)
    }
}

fn single_character(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// Symbols the scanner gives another meaning.
fn is_reserved(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || c == '(' || c == ')'
}

/// Operators in source order, each symbol appearing once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperatorTable {
    operators: Vec<Operator>,
}

impl OperatorTable {
    pub fn new(operators: Vec<Operator>) -> Result<Self> {
        let mut table = Self::default();
        for operator in operators {
            table.push(operator)?;
        }
        Ok(table)
    }

    /// `+ -` at priority 1, `* /` at 2 and a right-associative `^` at 3.
    pub fn standard() -> Self {
        use Action::*;
        use Associativity::*;
        Self {
            operators: vec![
                Operator::new('+', addition, 1, left),
                Operator::new('-', subtraction, 1, left),
                Operator::new('*', multiplication, 2, left),
                Operator::new('/', division, 2, left),
                Operator::new('^', exponentiation, 3, right),
            ],
        }
    }

    /// Builds a table from records of whitespace-separated fields. A record
    /// may span several lines or share one, only the field count matters.
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let records: Vec<S> = records.into_iter().collect();
        let fields: Vec<&str> = records.iter().flat_map(|r| r.as_ref().split_whitespace()).collect();

        let mut table = Self::default();
        for (index, chunk) in fields.chunks(4).enumerate() {
            let operator = Operator::from_fields(chunk).map_err(|e| match e {
                CalcError::malformed_operator(reason) => {
                    CalcError::malformed(format!("record {}: {reason}", index + 1))
                },
                other => other,
            })?;
            table.push(operator)?;
        }
        log::debug!("loaded {} operators", table.len());
        Ok(table)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_records(text.lines())
    }

    /// Reads the source to exhaustion before decoding any record.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        if let Err(e) = reader.read_to_string(&mut text) {
            log::error!("error occurred while reading the operator source: {e}");
            return Err(e.into());
        }
        Self::parse(&text)
    }

    fn push(&mut self, operator: Operator) -> Result<()> {
        if self.get(operator.symbol).is_some() {
            return Err(CalcError::duplicate_operator(operator.symbol));
        }
        self.operators.push(operator);
        Ok(())
    }

    pub fn get(&self, symbol: char) -> Option<&Operator> {
        self.operators.iter().find(|operator| operator.symbol == symbol)
    }

    pub fn find(&self, symbol: char) -> Result<&Operator> {
        self.get(symbol).ok_or(CalcError::operator_not_found(symbol))
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.get(symbol).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.iter()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct BrokenSource;

    impl Read for BrokenSource {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "source went away"))
        }
    }

    #[test]
    fn records_load_in_source_order() {
        let table = OperatorTable::parse("+ + 1 L\n* * 2 L\n^ ^ 3 R\n").unwrap();
        let symbols: Vec<char> = table.iter().map(|o| o.symbol).collect();
        assert_eq!(symbols, vec!['+', '*', '^']);
        assert_eq!(
            table.find('^').unwrap(),
            &Operator::new('^', Action::exponentiation, 3, Associativity::right)
        );
    }

    #[test]
    fn records_are_split_on_any_whitespace() {
        let table = OperatorTable::parse("+ + 1 L - - 1 L\n*\n*\n2\nL").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.find('*').unwrap().priority, 2);
    }

    #[test]
    fn empty_source_gives_empty_table() {
        assert!(OperatorTable::parse("").unwrap().is_empty());
        assert!(OperatorTable::from_reader("  \n\n".as_bytes()).unwrap().is_empty());
    }

    #[rstest]
    #[case("L")]
    #[case("x")]
    #[case("r")]
    fn anything_but_capital_r_is_left(#[case] field: &str) {
        assert_eq!(field.parse::<Associativity>().unwrap(), Associativity::left);
    }

    #[test]
    fn symbol_and_action_may_differ() {
        let table = OperatorTable::parse("x * 2 L").unwrap();
        assert_eq!(table.find('x').unwrap().action, Action::multiplication);
    }

    #[rstest]
    #[case("+ + one L")]
    #[case("+ % 1 L")]
    #[case("++ + 1 L")]
    #[case("( + 1 L")]
    #[case("7 + 1 L")]
    #[case("+ + 1 LR")]
    #[case("+ + 1 L\n* *")]
    fn malformed_records_are_rejected(#[case] source: &str) {
        assert!(matches!(
            OperatorTable::parse(source),
            Err(CalcError::malformed_operator(_))
        ));
    }

    #[test]
    fn malformed_record_reports_its_position() {
        let error = OperatorTable::parse("+ + 1 L\n* * two L").unwrap_err();
        assert_eq!(
            error.to_string(),
            "malformed operator record, record 2: 'two' is not an integer priority"
        );
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        assert!(matches!(
            OperatorTable::parse("+ + 1 L\n+ - 1 L"),
            Err(CalcError::duplicate_operator('+'))
        ));
    }

    #[test]
    fn tables_built_in_code_also_reject_duplicates() {
        use Action::*;
        use Associativity::*;
        let table = OperatorTable::new(vec![Operator::new('@', addition, 1, left)]).unwrap();
        assert!(table.contains('@'));
        assert!(OperatorTable::new(vec![
            Operator::new('@', addition, 1, left),
            Operator::new('@', division, 2, right),
        ])
        .is_err());
    }

    #[test]
    fn unreadable_source_is_a_read_failure() {
        assert!(matches!(
            OperatorTable::from_reader(BrokenSource),
            Err(CalcError::read_failure(_))
        ));
    }

    #[test]
    fn display_round_trips_through_the_loader() {
        for operator in OperatorTable::standard().iter() {
            assert_eq!(&operator.to_string().parse::<Operator>().unwrap(), operator);
        }
    }

    #[test]
    fn missing_symbol_is_not_found() {
        assert!(matches!(
            OperatorTable::standard().find('#'),
            Err(CalcError::operator_not_found('#'))
        ));
    }

    #[test]
    fn actions_apply_left_to_right_operand() {
        assert_eq!(Action::subtraction.call(7.0, 2.0), 5.0);
        assert_eq!(Action::division.call(8.0, 2.0), 4.0);
        assert_eq!(Action::exponentiation.call(2.0, 3.0), 8.0);
        assert!(Action::division.call(1.0, 0.0).is_infinite());
    }
}
