use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Unknown router model: {0}")]
    UnknownModel(String),

    #[error("Parse error at line {line}: unterminated quoted string: {text}")]
    UnterminatedQuote { line: usize, text: String },

    #[error("Parse error at line {line}: line continuation at end of input")]
    DanglingContinuation { line: usize },

    #[error(
        "Models {source_model} and {target_model} share no interface role; no port mapping is possible"
    )]
    IncompatiblePortProfile {
        source_model: String,
        target_model: String,
    },
}

impl MigrationError {
    /// Source line the error refers to, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            MigrationError::UnterminatedQuote { line, .. }
            | MigrationError::DanglingContinuation { line } => Some(*line),
            _ => None,
        }
    }
}
