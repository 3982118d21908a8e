use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid expression, {0}")]
    invalid_expression(String),

    #[error("could not read the operator source")]
    read_failure(#[from] std::io::Error),

    #[error("malformed operator record, {0}")]
    malformed_operator(String),

    #[error("the '{0}' operator is defined more than once")]
    duplicate_operator(char),

    #[error("could not find the '{0}' operator")]
    operator_not_found(char),
}

impl CalcError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::invalid_expression(reason.into())
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::malformed_operator(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
