mod dto;
mod services;

pub use dto::{Confidence, FoodItem, LoggedMeal, Macros, SourceLink};
pub(crate) use services::refresh_goal_banner;
pub use services::{
    clear_day, daily_totals, delete_meal, dismiss_goal_banner, goal_progress, log_meal,
    suggest_meal_note, update_meal_note, DayTotals, GoalBanner,
};
