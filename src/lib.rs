//! Local identity & sync store for the CalorieAI nutrition-logging client.
//!
//! The crate simulates a multi-tenant backend inside a client-held
//! key-value store: account snapshots keyed by normalized email, a working
//! [`Session`] that is echoed back into its snapshot after every mutation,
//! biometric unlock as an alternate credential path, and a deduplicated
//! notification feed (system events, daily AI insights, app-update
//! announcements). All invariants are enforced client-side; there is no
//! server authority.
//!
//! The UI layer and the AI analysis calls live outside this crate and talk
//! to it through the [`analyzer::NutritionAnalyzer`] and
//! [`auth::biometric::PlatformAuthenticator`] seams.

pub mod accounts;
pub mod analyzer;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod meals;
pub mod notes;
pub mod notifications;
pub mod state;
pub mod store;

pub use bootstrap::{startup, AppView, SignInPresentation};
pub use config::AppConfig;
pub use error::AuthError;
pub use state::{ProfileUpdate, Session};
