use std::path::PathBuf;

/// Runtime configuration, read from the environment (`.env` supported).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub app_version: String,
    pub biometric_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            store_path: std::env::var("CALORIEAI_STORE_PATH")
                .unwrap_or_else(|_| "calorieai-store.json".into())
                .into(),
            app_version: std::env::var("CALORIEAI_APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            biometric_timeout_secs: std::env::var("CALORIEAI_BIOMETRIC_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
        }
    }

    pub fn biometric_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.biometric_timeout_secs)
    }
}
