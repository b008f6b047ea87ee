//! User account data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidMode { value: u8 },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMode { value } => write!(f, "mode must be 0 or 1, got {value}"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Binary per-user flag altering client-side behaviour.
///
/// The flag's meaning is external to this API; the server only stores and
/// toggles it.
///
/// # Examples
/// ```
/// use shelfcheck_backend::domain::Mode;
///
/// let mode = Mode::ZERO;
/// assert_eq!(mode.toggled(), Mode::ONE);
/// assert_eq!(mode.toggled().toggled(), mode);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mode(u8);

impl Mode {
    pub const ZERO: Mode = Mode(0);
    pub const ONE: Mode = Mode(1);

    /// Validate and construct a [`Mode`] from a raw flag value.
    pub fn new(value: u8) -> Result<Self, UserValidationError> {
        match value {
            0 | 1 => Ok(Self(value)),
            other => Err(UserValidationError::InvalidMode { value: other }),
        }
    }

    /// The flipped flag.
    pub fn toggled(self) -> Self {
        Self(1 - self.0)
    }

    /// Raw flag value.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Mode {
    type Error = UserValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mode> for u8 {
    fn from(value: Mode) -> Self {
        value.0
    }
}

/// Stored login record, including the credential.
///
/// Never serialised to clients; handlers return [`User`] instead, which
/// excludes the password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub username: String,
    /// Either a bcrypt hash or, for records predating hashing, the legacy
    /// cleartext password.
    pub password: String,
    pub mode: Mode,
}

impl UserAccount {
    /// Build a stored account record.
    pub fn new(username: impl Into<String>, password: impl Into<String>, mode: Mode) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            mode,
        }
    }

    /// The client-visible view, with the password field excluded.
    pub fn public(&self) -> User {
        User {
            username: self.username.clone(),
            mode: self.mode,
        }
    }
}

/// Client-visible user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub mode: Mode,
}
