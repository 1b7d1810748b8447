use serde::{Deserialize, Serialize};

use crate::meals::LoggedMeal;
use crate::notes::PersonalNote;
use crate::notifications::Notification;

fn default_true() -> bool {
    true
}

/// Identity and goals for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub email: Option<String>, // unique tenant key, set at sign-up
    pub name: String,
    pub daily_calorie_goal: u32, // kcal, 1200..=4000
    pub height_cm: f64,          // 0 = unset
    pub weight_kg: f64,          // 0 = unset
    pub is_onboarded: bool,
    #[serde(default)]
    pub is_biometric_enabled: bool,
    #[serde(default = "default_true")]
    pub is_ai_suggestions_enabled: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            email: None,
            name: String::new(),
            daily_calorie_goal: 2000,
            height_cm: 0.0,
            weight_kg: 0.0,
            is_onboarded: false,
            is_biometric_enabled: false,
            is_ai_suggestions_enabled: true,
        }
    }
}

/// The durable unit of multi-tenancy: everything one account owns, keyed by
/// its normalized email in the account map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub profile: Profile,
    #[serde(default)]
    pub meals: Vec<LoggedMeal>,
    #[serde(default)]
    pub notes: Vec<PersonalNote>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

impl AccountSnapshot {
    /// Fresh snapshot for a newly created account.
    pub fn empty(profile: Profile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }
}
