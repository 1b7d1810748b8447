//! Cold-start session restoration: which view the app opens on and how the
//! sign-in screen presents itself.

use crate::accounts::{AccountStore, Profile};
use crate::config::AppConfig;
use crate::notifications;
use crate::state::Session;
use crate::store::{keys, PersistentRecord};

/// Views the core can land on. Everything else is UI-internal navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    SignIn,
    Onboarding,
    Dashboard,
}

/// How the sign-in screen should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInPresentation {
    PasswordForm,
    BiometricUnlock { email: String, name: String },
}

/// View resolution from the persisted session mirror, before any user
/// interaction. A user who closed the app mid-onboarding resumes there
/// instead of restarting.
pub fn initial_view(record: &PersistentRecord) -> AppView {
    match record.read::<Profile>(keys::PROFILE) {
        None => AppView::SignIn,
        Some(profile) if profile.is_onboarded => AppView::Dashboard,
        Some(profile) if !profile.name.trim().is_empty() => AppView::Onboarding,
        Some(_) => AppView::SignIn,
    }
}

/// Prefer the one-tap unlock when the remembered account opted in.
pub fn sign_in_presentation(accounts: &AccountStore) -> SignInPresentation {
    if let Some(email) = accounts.remembered_session() {
        if let Some(snapshot) = accounts.find_account(&email) {
            if snapshot.profile.is_biometric_enabled {
                return SignInPresentation::BiometricUnlock {
                    email,
                    name: snapshot.profile.name,
                };
            }
        }
    }
    SignInPresentation::PasswordForm
}

/// "Not you?": drop only the remembered pointer; the account stays.
pub fn forget_remembered_user(accounts: &AccountStore) {
    accounts.clear_remembered_session();
}

/// Open the store, resolve the initial view from the raw mirror, restore
/// the working session and run the startup update announcement.
pub fn startup(config: &AppConfig) -> (Session, AppView) {
    let record = PersistentRecord::file(&config.store_path);
    let view = initial_view(&record);
    let mut session = Session::open(record, config.app_version.clone());
    notifications::announce_update(&mut session);
    (session, view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountSnapshot;
    use crate::notifications::NotificationKind;
    use crate::store::keys;

    #[test]
    fn absent_profile_opens_sign_in() {
        let record = PersistentRecord::in_memory();
        assert_eq!(initial_view(&record), AppView::SignIn);
    }

    #[test]
    fn onboarded_profile_opens_the_dashboard() {
        let record = PersistentRecord::in_memory();
        record.write(
            keys::PROFILE,
            &Profile {
                email: Some("a@x.com".into()),
                name: "Alex".into(),
                is_onboarded: true,
                ..Profile::default()
            },
        );
        assert_eq!(initial_view(&record), AppView::Dashboard);
    }

    #[test]
    fn named_but_unfinished_profile_resumes_onboarding() {
        let record = PersistentRecord::in_memory();
        record.write(
            keys::PROFILE,
            &Profile {
                email: Some("a@x.com".into()),
                name: "Alex".into(),
                ..Profile::default()
            },
        );
        assert_eq!(initial_view(&record), AppView::Onboarding);
    }

    #[test]
    fn anonymous_default_profile_opens_sign_in() {
        let record = PersistentRecord::in_memory();
        record.write(keys::PROFILE, &Profile::default());
        assert_eq!(initial_view(&record), AppView::SignIn);
    }

    #[test]
    fn corrupt_profile_mirror_falls_back_to_sign_in() {
        let record = PersistentRecord::in_memory();
        record.write(keys::PROFILE, &"garbage");
        assert_eq!(initial_view(&record), AppView::SignIn);
    }

    #[test]
    fn biometric_unlock_is_preferred_for_enrolled_remembered_accounts() {
        let record = PersistentRecord::in_memory();
        let accounts = AccountStore::new(record);
        accounts.upsert_account(
            "a@x.com",
            &AccountSnapshot::empty(Profile {
                email: Some("a@x.com".into()),
                name: "Alex".into(),
                is_biometric_enabled: true,
                ..Profile::default()
            }),
        );
        accounts.remember_session("a@x.com");

        assert_eq!(
            sign_in_presentation(&accounts),
            SignInPresentation::BiometricUnlock {
                email: "a@x.com".into(),
                name: "Alex".into(),
            }
        );
    }

    #[test]
    fn password_form_when_not_enrolled_or_not_remembered() {
        let record = PersistentRecord::in_memory();
        let accounts = AccountStore::new(record);
        assert_eq!(sign_in_presentation(&accounts), SignInPresentation::PasswordForm);

        accounts.upsert_account(
            "a@x.com",
            &AccountSnapshot::empty(Profile {
                email: Some("a@x.com".into()),
                name: "Alex".into(),
                ..Profile::default()
            }),
        );
        accounts.remember_session("a@x.com");
        assert_eq!(sign_in_presentation(&accounts), SignInPresentation::PasswordForm);
    }

    #[test]
    fn forgetting_the_remembered_user_switches_to_the_password_form() {
        let record = PersistentRecord::in_memory();
        let accounts = AccountStore::new(record);
        accounts.upsert_account(
            "a@x.com",
            &AccountSnapshot::empty(Profile {
                email: Some("a@x.com".into()),
                name: "Alex".into(),
                is_biometric_enabled: true,
                ..Profile::default()
            }),
        );
        accounts.remember_session("a@x.com");

        forget_remembered_user(&accounts);
        assert_eq!(sign_in_presentation(&accounts), SignInPresentation::PasswordForm);
        assert!(accounts.find_account("a@x.com").is_some());
    }

    #[test]
    fn startup_announces_the_update_once_across_cold_starts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            store_path: dir.path().join("store.json"),
            app_version: "1.1.0".into(),
            biometric_timeout_secs: 60,
        };

        let (session, view) = startup(&config);
        assert_eq!(view, AppView::SignIn);
        assert_eq!(
            session
                .notifications
                .iter()
                .filter(|n| n.kind == NotificationKind::Update)
                .count(),
            1
        );
        drop(session);

        let (session, _) = startup(&config);
        assert_eq!(
            session
                .notifications
                .iter()
                .filter(|n| n.kind == NotificationKind::Update)
                .count(),
            1
        );
    }
}
