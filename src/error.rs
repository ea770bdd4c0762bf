//! Error types for the seed engine

/// Everything the seed engine can fail with
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A numeric helper was called outside its domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A description's word count is not a Fibonacci number
    #[error("description length {words} is not a Fibonacci number: {description:?}")]
    FailedDescriptionLength { words: usize, description: String },

    /// A loaded derived field disagrees with its recomputed value (strict mode)
    #[error("seed validation failed: {0}")]
    SeedValidation(String),

    #[error("asset {0} doesn't exist")]
    AssetNotFound(String),

    #[error("descriptor {0} doesn't exist")]
    DescriptorNotFound(String),

    #[error("description {description:?} not found in descriptor {descriptor}")]
    DescriptionNotFound { descriptor: String, description: String },

    #[error("descriptor {descriptor} is not linked to asset {asset}")]
    DescriptorNotLinked { asset: String, descriptor: String },

    /// Two raw map keys collapse to the same lower-cased name
    #[error("duplicate {kind} name after normalization: {name}")]
    DuplicateName { kind: &'static str, name: String },

    /// A raw map key names a different entity than the record under it
    #[error("{kind} stored under key {key} is named {name}")]
    NameMismatch {
        kind: &'static str,
        key: String,
        name: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SeedError {
    /// Lookup and removal failures: the caller referenced something absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SeedError::AssetNotFound(_)
                | SeedError::DescriptorNotFound(_)
                | SeedError::DescriptionNotFound { .. }
                | SeedError::DescriptorNotLinked { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
