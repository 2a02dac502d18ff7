use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RexgenError {
    #[error("invalid regex pattern")]
    Parse(#[from] regex_syntax::Error),

    #[error("pattern admits infinitely many strings")]
    TooManyRepeat,

    #[error("unsupported regex element `{0}`")]
    Unsupported(String),

    #[error("unknown regex flag `{0}`")]
    UnknownFlag(char),

    #[error("branch probability {0} out of range")]
    InvalidProbability(i64),
}
