use tracing::warn;
use uuid::Uuid;

use crate::analyzer::NutritionAnalyzer;
use crate::notifications::{self, Notification};
use crate::state::Session;

use super::dto::{FoodItem, LoggedMeal};

/// Goal-reached banner for the current log, tracked per session. Dismissal
/// sticks until the log empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalBanner {
    #[default]
    Hidden,
    Shown,
    Dismissed,
}

/// Dashboard aggregates over the working log.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub fn daily_totals(session: &Session) -> DayTotals {
    session
        .meals
        .iter()
        .fold(DayTotals::default(), |mut totals, meal| {
            totals.calories += meal.item.calories;
            totals.protein += meal.item.macros.protein;
            totals.carbs += meal.item.macros.carbs;
            totals.fat += meal.item.macros.fat;
            totals
        })
}

/// Share of the daily goal reached, in percent, capped at 100.
pub fn goal_progress(session: &Session) -> f64 {
    let goal = session.profile.daily_calorie_goal.max(1) as f64;
    (daily_totals(session).calories / goal * 100.0).min(100.0)
}

pub(crate) fn refresh_goal_banner(session: &mut Session) {
    if session.meals.is_empty() {
        session.goal_banner = GoalBanner::Hidden;
        return;
    }
    let reached = daily_totals(session).calories >= session.profile.daily_calorie_goal as f64;
    match session.goal_banner {
        GoalBanner::Dismissed => {}
        _ if reached => session.goal_banner = GoalBanner::Shown,
        GoalBanner::Shown => session.goal_banner = GoalBanner::Hidden,
        _ => {}
    }
}

pub fn dismiss_goal_banner(session: &mut Session) {
    if session.goal_banner == GoalBanner::Shown {
        session.goal_banner = GoalBanner::Dismissed;
    }
}

/// Save an analyzed item to the log (newest first) and announce it in the
/// feed. Returns the new meal's id.
pub fn log_meal(session: &mut Session, item: FoodItem, image_uri: Option<String>) -> Uuid {
    let meal = LoggedMeal::new(item, image_uri);
    let id = meal.id;
    let message = format!("Tracked {} ({} kcal).", meal.item.name, meal.item.calories);
    session.meals.insert(0, meal);
    refresh_goal_banner(session);
    notifications::add(session, Notification::system("Meal logged", message));
    id
}

/// Note edits are the only mutation a logged meal supports. Blank input
/// clears the note.
pub fn update_meal_note(session: &mut Session, id: Uuid, note: &str) -> bool {
    let Some(meal) = session.meals.iter_mut().find(|m| m.id == id) else {
        return false;
    };
    let trimmed = note.trim();
    meal.note = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
    session.sync();
    true
}

pub fn delete_meal(session: &mut Session, id: Uuid) -> bool {
    let before = session.meals.len();
    session.meals.retain(|m| m.id != id);
    let removed = session.meals.len() != before;
    if removed {
        refresh_goal_banner(session);
        session.sync();
    }
    removed
}

/// "Start new day": drops the meal log only; notes and the feed stay.
pub fn clear_day(session: &mut Session) {
    session.meals.clear();
    refresh_goal_banner(session);
    session.sync();
}

/// Ask the analyzer for a reflection prompt after a logged meal. Honors the
/// profile preference; failures are logged and yield nothing (the user
/// re-initiates explicitly, there are no automatic retries).
pub async fn suggest_meal_note(
    session: &Session,
    analyzer: &dyn NutritionAnalyzer,
    item: &FoodItem,
) -> Option<String> {
    if !session.profile.is_ai_suggestions_enabled {
        return None;
    }
    match analyzer.suggest_meal_note(item).await {
        Ok(suggestion) if !suggestion.trim().is_empty() => Some(suggestion),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "meal note suggestion failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::testing::{sample_item, StubAnalyzer};
    use crate::notifications::NotificationKind;
    use crate::state::testing::signed_in;
    use std::sync::atomic::Ordering;

    #[test]
    fn log_meal_prepends_announces_and_writes_through() {
        let mut session = signed_in("a@x.com");
        log_meal(&mut session, sample_item("Oatmeal", 290.0), None);
        let id = log_meal(&mut session, sample_item("Salmon Fillet", 410.0), None);

        assert_eq!(session.meals[0].id, id);
        assert_eq!(
            session
                .notifications
                .iter()
                .filter(|n| n.kind == NotificationKind::System)
                .count(),
            2
        );

        let snapshot = session
            .accounts()
            .find_account("a@x.com")
            .expect("snapshot");
        assert_eq!(snapshot.meals.len(), 2);
        assert_eq!(snapshot.meals[0].item.name, "Salmon Fillet");
    }

    #[test]
    fn delete_leaves_the_remaining_meal_and_other_accounts_untouched() {
        let mut session = signed_in("a@x.com");
        let other = crate::accounts::AccountSnapshot::empty(crate::accounts::Profile {
            email: Some("b@x.com".into()),
            name: "Blake".into(),
            ..Default::default()
        });
        session.accounts().upsert_account("b@x.com", &other);
        let other_before = serde_json::to_string(&other).expect("serialize other");

        let keep = log_meal(&mut session, sample_item("Oatmeal", 290.0), None);
        let drop = log_meal(&mut session, sample_item("Burger", 780.0), None);
        assert!(delete_meal(&mut session, drop));
        assert!(!delete_meal(&mut session, drop));

        let snapshot = session
            .accounts()
            .find_account("a@x.com")
            .expect("snapshot");
        assert_eq!(snapshot.meals.len(), 1);
        assert_eq!(snapshot.meals[0].id, keep);

        let other_after = session
            .accounts()
            .find_account("b@x.com")
            .expect("other account");
        assert_eq!(
            serde_json::to_string(&other_after).expect("serialize other"),
            other_before
        );
    }

    #[test]
    fn blank_note_edit_clears_the_note() {
        let mut session = signed_in("a@x.com");
        let id = log_meal(&mut session, sample_item("Oatmeal", 290.0), None);

        assert!(update_meal_note(&mut session, id, "  kept me full all morning "));
        assert_eq!(
            session.meals[0].note.as_deref(),
            Some("kept me full all morning")
        );

        assert!(update_meal_note(&mut session, id, "   "));
        assert_eq!(session.meals[0].note, None);
        assert!(!update_meal_note(&mut session, Uuid::new_v4(), "nope"));
    }

    #[test]
    fn totals_and_progress_follow_the_log() {
        let mut session = signed_in("a@x.com");
        session.profile.daily_calorie_goal = 2000;
        log_meal(&mut session, sample_item("Oatmeal", 290.0), None);
        log_meal(&mut session, sample_item("Salmon Fillet", 410.0), None);

        let totals = daily_totals(&session);
        assert_eq!(totals.calories, 700.0);
        assert_eq!(totals.protein, 40.0);
        assert_eq!(goal_progress(&session), 35.0);
    }

    #[test]
    fn goal_banner_shows_dismisses_and_resets_with_the_log() {
        let mut session = signed_in("a@x.com");
        session.profile.daily_calorie_goal = 1200;

        log_meal(&mut session, sample_item("Snack", 400.0), None);
        assert_eq!(session.goal_banner, GoalBanner::Hidden);

        log_meal(&mut session, sample_item("Feast", 900.0), None);
        assert_eq!(session.goal_banner, GoalBanner::Shown);

        dismiss_goal_banner(&mut session);
        assert_eq!(session.goal_banner, GoalBanner::Dismissed);

        // Staying over goal never resurrects a dismissed banner.
        log_meal(&mut session, sample_item("Dessert", 300.0), None);
        assert_eq!(session.goal_banner, GoalBanner::Dismissed);

        clear_day(&mut session);
        assert_eq!(session.goal_banner, GoalBanner::Hidden);
        assert!(session.meals.is_empty());

        log_meal(&mut session, sample_item("Feast", 1300.0), None);
        assert_eq!(session.goal_banner, GoalBanner::Shown);
    }

    #[tokio::test]
    async fn suggestions_honor_the_profile_preference() {
        let mut session = signed_in("a@x.com");
        let analyzer = StubAnalyzer::default();
        let item = sample_item("Oatmeal", 290.0);

        session.set_ai_suggestions(false);
        assert_eq!(suggest_meal_note(&session, &analyzer, &item).await, None);
        assert_eq!(analyzer.suggest_calls.load(Ordering::SeqCst), 0);

        session.set_ai_suggestions(true);
        let suggestion = suggest_meal_note(&session, &analyzer, &item)
            .await
            .expect("suggestion");
        assert!(suggestion.contains("Oatmeal"));
    }

    #[tokio::test]
    async fn failed_suggestion_is_silent_and_nonfatal() {
        let session = signed_in("a@x.com");
        let analyzer = StubAnalyzer::failing();
        let item = sample_item("Oatmeal", 290.0);
        assert_eq!(suggest_meal_note(&session, &analyzer, &item).await, None);
    }
}
