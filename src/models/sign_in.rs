use serde::Deserialize;

/// Credentials submitted at sign-in. Never persisted.
#[derive(Deserialize, Clone)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignIn")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Result of checking a `SignIn` against the stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    Success(i32),
    UserNotFound,
    PasswordMismatch,
}

impl SignInOutcome {
    /// The signed-in user's id, or `None` for either failure.
    ///
    /// Use this when the caller should not reveal which check failed.
    pub fn user_id(&self) -> Option<i32> {
        match self {
            Self::Success(id) => Some(*id),
            Self::UserNotFound | Self::PasswordMismatch => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
