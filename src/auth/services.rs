use tracing::{info, instrument, warn};

use crate::accounts::{normalize_email, AccountSnapshot, Profile};
use crate::analyzer::NutritionAnalyzer;
use crate::bootstrap::AppView;
use crate::error::{AuthError, Field, FieldError};
use crate::notifications;
use crate::state::Session;

use super::biometric::BiometricBridge;
use super::dto::{Credential, OnboardingForm, SignInRequest, SignUpRequest};

pub(crate) const PASSWORD_MIN: usize = 8;
pub(crate) const PASSWORD_MAX: usize = 15;

fn password_in_bounds(password: &str) -> bool {
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&password.chars().count())
}

fn validate_sign_in(request: &SignInRequest) -> Result<(), AuthError> {
    let mut errors = Vec::new();
    if request.email.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Email,
            message: "enter your email address",
        });
    }
    if let Credential::Password(password) = &request.credential {
        if !password_in_bounds(password) {
            errors.push(FieldError {
                field: Field::Password,
                message: "password must be 8-15 characters",
            });
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Validation(errors))
    }
}

/// Resolve a validated credential against the account map and restore the
/// matching snapshot into the working session. Accounts are keyed by email
/// alone; a well-formed credential either authenticates or is NotFound.
#[instrument(skip(session, analyzer, request), fields(email = %request.email))]
pub async fn sign_in(
    session: &mut Session,
    analyzer: &dyn NutritionAnalyzer,
    request: SignInRequest,
) -> Result<AppView, AuthError> {
    validate_sign_in(&request)?;
    let email = normalize_email(&request.email);

    let Some(snapshot) = session.accounts().find_account(&email) else {
        warn!("sign-in for unknown email");
        return Err(AuthError::AccountNotFound);
    };

    session.load_snapshot(snapshot);
    if session.profile.email.is_none() {
        // Snapshots written before the email landed on the profile.
        session.profile.email = Some(email.clone());
        session.sync();
    }
    session.accounts().remember_session(&email);
    notifications::announce_update(session);
    info!("signed in");

    if session.profile.is_onboarded {
        // Fire-and-forget relative to navigation: a failed insight never
        // blocks or rolls back the dashboard.
        notifications::generate_daily_insight(session, analyzer).await;
        Ok(AppView::Dashboard)
    } else {
        Ok(AppView::Onboarding)
    }
}

/// One-tap unlock for the remembered account. Offered only when that
/// account enabled biometrics; on any bridge failure the caller stays on
/// the form and may fall back to the password path.
#[instrument(skip(session, bridge, analyzer))]
pub async fn sign_in_with_biometric(
    session: &mut Session,
    bridge: &BiometricBridge,
    analyzer: &dyn NutritionAnalyzer,
) -> Result<AppView, AuthError> {
    let Some(email) = session.accounts().remembered_session() else {
        return Err(AuthError::BiometricUnavailable);
    };
    let enabled = session
        .accounts()
        .find_account(&email)
        .map(|snapshot| snapshot.profile.is_biometric_enabled)
        .unwrap_or(false);
    if !enabled {
        return Err(AuthError::BiometricUnavailable);
    }

    if !bridge.authenticate().await {
        warn!(email = %email, "biometric unlock rejected");
        return Err(AuthError::BiometricRejected);
    }

    sign_in(
        session,
        analyzer,
        SignInRequest {
            email,
            credential: Credential::BiometricAssertion,
        },
    )
    .await
}

/// Create a fresh account. A taken email is a conflict and mutates nothing.
#[instrument(skip(session, request), fields(email = %request.email))]
pub fn sign_up(session: &mut Session, request: SignUpRequest) -> Result<AppView, AuthError> {
    let mut errors = Vec::new();
    if request.name.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Name,
            message: "name is required",
        });
    }
    if request.email.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Email,
            message: "enter your email address",
        });
    }
    if !password_in_bounds(&request.password) {
        errors.push(FieldError {
            field: Field::Password,
            message: "password must be 8-15 characters",
        });
    }
    if request.confirm_password != request.password {
        errors.push(FieldError {
            field: Field::ConfirmPassword,
            message: "passwords do not match",
        });
    }
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    let email = normalize_email(&request.email);
    if session.accounts().account_exists(&email) {
        warn!("sign-up for existing email");
        return Err(AuthError::AccountExists);
    }

    let profile = Profile {
        email: Some(email.clone()),
        name: request.name.trim().to_string(),
        ..Profile::default()
    };
    session.load_snapshot(AccountSnapshot::empty(profile));
    session.accounts().remember_session(&email);
    info!("account created");
    Ok(AppView::Onboarding)
}

/// Finish onboarding and land on the dashboard.
pub fn complete_onboarding(
    session: &mut Session,
    form: OnboardingForm,
) -> Result<AppView, AuthError> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(FieldError {
            field: Field::Name,
            message: "name is required",
        });
    }
    if form.height_cm <= 0.0 {
        errors.push(FieldError {
            field: Field::Height,
            message: "height must be positive",
        });
    }
    if form.weight_kg <= 0.0 {
        errors.push(FieldError {
            field: Field::Weight,
            message: "weight must be positive",
        });
    }
    if !(1200..=4000).contains(&form.daily_calorie_goal) {
        errors.push(FieldError {
            field: Field::CalorieGoal,
            message: "daily goal must be between 1200 and 4000 kcal",
        });
    }
    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    session.profile.name = form.name.trim().to_string();
    session.profile.height_cm = form.height_cm;
    session.profile.weight_kg = form.weight_kg;
    session.profile.daily_calorie_goal = form.daily_calorie_goal;
    session.profile.is_onboarded = true;
    session.sync();
    info!(email = ?session.active_email(), "onboarding complete");
    Ok(AppView::Dashboard)
}

/// Clears the working state and the active-session mirror keys. The
/// remembered session and the account snapshot are intentionally kept so a
/// later biometric or password login restores full history.
pub fn sign_out(session: &mut Session) -> AppView {
    if let Some(email) = session.active_email() {
        info!(email = %email, "signed out");
    }
    session.reset_working_state();
    AppView::SignIn
}

/// Toggle biometric unlock for the active account. Enabling requires a
/// successful platform registration; either way the flag is written through
/// to the snapshot in this call, not on a later autosave. Returns the
/// resulting flag state.
pub async fn set_biometric(
    session: &mut Session,
    bridge: &BiometricBridge,
    enabled: bool,
) -> bool {
    if !enabled {
        session.profile.is_biometric_enabled = false;
        session.sync();
        return false;
    }

    let account_hint = session.active_email().unwrap_or_default().to_string();
    let display_name = session.profile.name.clone();
    if bridge.register(&account_hint, &display_name).await {
        session.profile.is_biometric_enabled = true;
        session.sync();
        true
    } else {
        warn!("biometric enrollment failed, leaving unlock disabled");
        false
    }
}
