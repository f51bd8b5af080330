use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentifierError {
    /// No configuration was installed before identifiers were requested
    #[error("no accessibility identifier configuration installed")]
    MissingConfiguration,

    /// A shared session mutex was poisoned by a panicking holder
    #[error("shared identifier session lock poisoned")]
    LockPoisoned,

    #[error("I/O error ({context}): {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML error ({context}): {source}")]
    Yaml {
        context: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A persisted or CLI-supplied generation mode was not recognized
    #[error("unknown generation mode '{0}' (expected automatic, manual or semantic)")]
    InvalidMode(String),

    /// Unknown UI-test export dialect
    #[error("unknown test dialect '{0}' (expected xcuitest or playwright)")]
    InvalidDialect(String),

    /// Clipboard helper could not be spawned or rejected the text
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

impl IdentifierError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        IdentifierError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        IdentifierError::Json {
            context: context.into(),
            source,
        }
    }

    pub fn yaml(context: impl Into<String>, source: serde_yaml::Error) -> Self {
        IdentifierError::Yaml {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentifierError>;
