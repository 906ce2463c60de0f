use std::fmt;

/// Failure to resolve an asset key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    MissingImage(String),
    MissingSound(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::MissingImage(key) => write!(f, "missing image asset '{}'", key),
            AssetError::MissingSound(key) => write!(f, "missing sound asset '{}'", key),
        }
    }
}

impl std::error::Error for AssetError {}
