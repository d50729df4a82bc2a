use crate::auth::AuthError;
use crate::kv::KvError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Auth(AuthError),
    Cache(KvError),
    /// Identity could not be serialized for the cache.
    Encode(serde_json::Error),
    /// Cached blob under `key` is not a valid identity record.
    Decode {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(err) => write!(f, "{err}"),
            Self::Cache(err) => write!(f, "session cache error: {err}"),
            Self::Encode(err) => write!(f, "failed to encode session identity: {err}"),
            Self::Decode { key, source } => {
                write!(f, "cached session entry `{key}` is corrupt: {source}")
            }
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Auth(err) => Some(err),
            Self::Cache(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<AuthError> for SessionError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<KvError> for SessionError {
    fn from(value: KvError) -> Self {
        Self::Cache(value)
    }
}
