use crate::accounts::{AccountSnapshot, AccountStore, Profile};
use crate::error::{AuthError, Field, FieldError};
use crate::meals::{GoalBanner, LoggedMeal};
use crate::notes::PersonalNote;
use crate::notifications::Notification;
use crate::store::{keys, PersistentRecord};

/// Working state for the active session. One `Session` is passed to every
/// operation; [`Session::sync`] is the single point that writes it back.
pub struct Session {
    pub profile: Profile,
    pub meals: Vec<LoggedMeal>,
    pub notes: Vec<PersonalNote>,
    pub notifications: Vec<Notification>,
    pub goal_banner: GoalBanner,
    record: PersistentRecord,
    accounts: AccountStore,
    app_version: String,
}

/// Settings edit; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub daily_calorie_goal: Option<u32>,
}

impl Session {
    /// Restore the active-session mirror from the store. Malformed entries
    /// degrade to defaults; cold start never fails.
    pub fn open(record: PersistentRecord, app_version: impl Into<String>) -> Self {
        let accounts = AccountStore::new(record.clone());
        let mut session = Self {
            profile: record.read(keys::PROFILE).unwrap_or_default(),
            meals: record.read(keys::MEALS).unwrap_or_default(),
            notes: record.read(keys::NOTES).unwrap_or_default(),
            notifications: record.read(keys::NOTIFICATIONS).unwrap_or_default(),
            goal_banner: GoalBanner::Hidden,
            record,
            accounts,
            app_version: app_version.into(),
        };
        crate::meals::refresh_goal_banner(&mut session);
        session
    }

    pub fn in_memory(app_version: &str) -> Self {
        Self::open(PersistentRecord::in_memory(), app_version)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    /// Raw handle to the underlying store, e.g. for
    /// [`crate::bootstrap::initial_view`].
    pub fn record(&self) -> &PersistentRecord {
        &self.record
    }

    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    pub fn active_email(&self) -> Option<&str> {
        self.profile.email.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.email.is_some()
    }

    fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            profile: self.profile.clone(),
            meals: self.meals.clone(),
            notes: self.notes.clone(),
            notifications: self.notifications.clone(),
        }
    }

    /// The designated synchronization point: mirror the working state under
    /// the `calorieai_*` session keys, then echo the full snapshot into the
    /// account map. Anonymous (pre-sign-up) state never reaches the map.
    pub(crate) fn sync(&mut self) {
        self.record.write(keys::PROFILE, &self.profile);
        self.record.write(keys::MEALS, &self.meals);
        self.record.write(keys::NOTES, &self.notes);
        self.record.write(keys::NOTIFICATIONS, &self.notifications);
        if let Some(email) = self.profile.email.clone() {
            self.accounts.upsert_account(&email, &self.snapshot());
        }
    }

    /// Replace the working state with a stored snapshot (sign-in restore).
    pub(crate) fn load_snapshot(&mut self, snapshot: AccountSnapshot) {
        self.profile = snapshot.profile;
        self.meals = snapshot.meals;
        self.notes = snapshot.notes;
        self.notifications = snapshot.notifications;
        self.goal_banner = GoalBanner::Hidden;
        crate::meals::refresh_goal_banner(self);
        self.sync();
    }

    /// Drop the working state and the mirror keys. The remembered session
    /// and the account snapshot survive so the next login restores history.
    pub(crate) fn reset_working_state(&mut self) {
        self.profile = Profile::default();
        self.meals.clear();
        self.notes.clear();
        self.notifications.clear();
        self.goal_banner = GoalBanner::Hidden;
        self.record.remove(keys::PROFILE);
        self.record.remove(keys::MEALS);
        self.record.remove(keys::NOTES);
        self.record.remove(keys::NOTIFICATIONS);
    }

    /// "Clear history": meal log, notes and the feed for the active account.
    pub fn clear_history(&mut self) {
        self.meals.clear();
        self.notes.clear();
        self.notifications.clear();
        self.goal_banner = GoalBanner::Hidden;
        self.sync();
    }

    /// Apply a validated settings edit and write it through immediately.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<(), AuthError> {
        let mut errors = Vec::new();
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                errors.push(FieldError {
                    field: Field::Name,
                    message: "name is required",
                });
            }
        }
        if let Some(height) = update.height_cm {
            if height <= 0.0 {
                errors.push(FieldError {
                    field: Field::Height,
                    message: "height must be positive",
                });
            }
        }
        if let Some(weight) = update.weight_kg {
            if weight <= 0.0 {
                errors.push(FieldError {
                    field: Field::Weight,
                    message: "weight must be positive",
                });
            }
        }
        if let Some(goal) = update.daily_calorie_goal {
            if !(1200..=4000).contains(&goal) {
                errors.push(FieldError {
                    field: Field::CalorieGoal,
                    message: "daily goal must be between 1200 and 4000 kcal",
                });
            }
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        if let Some(name) = update.name {
            self.profile.name = name.trim().to_string();
        }
        if let Some(height) = update.height_cm {
            self.profile.height_cm = height;
        }
        if let Some(weight) = update.weight_kg {
            self.profile.weight_kg = weight;
        }
        if let Some(goal) = update.daily_calorie_goal {
            self.profile.daily_calorie_goal = goal;
        }
        self.sync();
        Ok(())
    }

    pub fn set_ai_suggestions(&mut self, enabled: bool) {
        self.profile.is_ai_suggestions_enabled = enabled;
        self.sync();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Session already signed in and onboarded, snapshot written through.
    pub(crate) fn signed_in(email: &str) -> Session {
        let mut session = Session::in_memory("1.1.0");
        session.profile = Profile {
            email: Some(crate::accounts::normalize_email(email)),
            name: "Alex".into(),
            is_onboarded: true,
            ..Profile::default()
        };
        session.sync();
        session
    }
}
