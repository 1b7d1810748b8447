use serde::Deserialize;

/// How the user proved who they are. The biometric variant is produced by
/// the unlock flow after the platform assertion succeeded; it carries no
/// secret and skips password validation entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Password(String),
    BiometricAssertion,
}

/// Sign-in form input.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    pub email: String,
    pub credential: Credential,
}

impl SignInRequest {
    pub fn with_password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            credential: Credential::Password(password.into()),
        }
    }
}

/// Sign-up form input.
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Onboarding form input (mid-flow resume keeps whatever was entered).
#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingForm {
    pub name: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub daily_calorie_goal: u32,
}
