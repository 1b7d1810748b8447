use thiserror::Error;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Height,
    Weight,
    CalorieGoal,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::CalorieGoal => "calorie_goal",
        };
        f.write_str(name)
    }
}

/// One inline field error, surfaced next to its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed form input. Recovered inline; nothing is persisted.
    #[error("invalid form input")]
    Validation(Vec<FieldError>),

    /// The email has no account. The UI offers sign-up instead of asking
    /// for a retry of the same address.
    #[error("no account registered for this email")]
    AccountNotFound,

    /// Sign-up with an email that already owns a snapshot.
    #[error("an account with this email already exists")]
    AccountExists,

    /// Biometric unlock requested without a remembered account that has it
    /// enabled.
    #[error("biometric sign-in is not set up for this account")]
    BiometricUnavailable,

    /// The platform declined the assertion, timed out, or the user
    /// cancelled. The caller stays on the form and may fall back to the
    /// password path.
    #[error("biometric authentication failed or was cancelled")]
    BiometricRejected,
}

impl AuthError {
    /// Field errors carried by a validation failure, empty otherwise.
    pub fn fields(&self) -> &[FieldError] {
        match self {
            AuthError::Validation(fields) => fields,
            _ => &[],
        }
    }
}
