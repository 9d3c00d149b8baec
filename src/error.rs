use thiserror::Error;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    Execution,
    Parse,
    NotFound,
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    /// The node binary could not be spawned or exited with a non-zero status
    #[error("error executing `{command}`: {output}")]
    Execution { command: String, output: String },
    #[error("{context}: {reason}")]
    Parse { context: String, reason: String },
    #[error("{0}")]
    NotFound(String),
    #[error("{context}: {source}")]
    Wrapped {
        context: String,
        #[source]
        source: Box<UpgradeError>,
    },
}

pub type UpgradeResult<T> = std::result::Result<T, UpgradeError>;

impl UpgradeError {
    pub fn parse(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn wrap(self, context: impl Into<String>) -> Self {
        Self::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Kind of the innermost error, looking through any context wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Execution { .. } => ErrorKind::Execution,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Wrapped { source, .. } => source.kind(),
        }
    }
}
