//! Wrapper over the opaque platform credential API. The bridge reports
//! success or failure only; it never stores secrets and never surfaces raw
//! platform errors. A successful assertion is a device-local signal ("the
//! same physical user verified here"), not account identity: binding to an
//! account is the profile's `is_biometric_enabled` flag checked by the auth
//! services.

use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const RELYING_PARTY: &str = "CalorieAI";

/// Request to mint a new platform credential.
#[derive(Debug, Clone)]
pub struct CredentialRequest {
    pub challenge: [u8; 32],
    pub user_handle: [u8; 16],
    pub user_name: String,
    pub display_name: String,
    pub relying_party: String,
    pub require_user_verification: bool,
    pub timeout: Duration,
}

/// Request for an assertion against an existing platform credential.
#[derive(Debug, Clone)]
pub struct AssertionRequest {
    pub challenge: [u8; 32],
    pub require_user_verification: bool,
    pub timeout: Duration,
}

/// Opaque platform credential capability (OS / browser authenticator).
#[async_trait]
pub trait PlatformAuthenticator: Send + Sync {
    /// False when the device offers no user-verifying platform
    /// authenticator. Must not error.
    async fn is_available(&self) -> bool;
    async fn create_credential(&self, request: CredentialRequest) -> anyhow::Result<()>;
    async fn get_assertion(&self, request: AssertionRequest) -> anyhow::Result<()>;
}

pub struct BiometricBridge {
    platform: Arc<dyn PlatformAuthenticator>,
    timeout: Duration,
}

impl BiometricBridge {
    pub fn new(platform: Arc<dyn PlatformAuthenticator>) -> Self {
        Self::with_timeout(platform, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(platform: Arc<dyn PlatformAuthenticator>, timeout: Duration) -> Self {
        Self { platform, timeout }
    }

    pub async fn is_available(&self) -> bool {
        self.platform.is_available().await
    }

    /// Mint a credential bound to a fresh random challenge and user handle.
    /// Cancellation, timeout and platform refusals all come back as `false`.
    pub async fn register(&self, account_hint: &str, display_name: &str) -> bool {
        if !self.platform.is_available().await {
            debug!("no user-verifying platform authenticator");
            return false;
        }
        let request = CredentialRequest {
            challenge: fresh_bytes(),
            user_handle: fresh_bytes(),
            user_name: non_empty_or(account_hint, "user"),
            display_name: non_empty_or(display_name, "User"),
            relying_party: RELYING_PARTY.into(),
            require_user_verification: true,
            timeout: self.timeout,
        };
        match tokio::time::timeout(self.timeout, self.platform.create_credential(request)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "biometric registration refused or cancelled");
                false
            }
            Err(_) => {
                warn!("biometric registration timed out");
                false
            }
        }
    }

    /// Request an assertion with required user verification. Same bounded
    /// timeout and false-on-failure contract as [`register`].
    ///
    /// [`register`]: BiometricBridge::register
    pub async fn authenticate(&self) -> bool {
        if !self.platform.is_available().await {
            return false;
        }
        let request = AssertionRequest {
            challenge: fresh_bytes(),
            require_user_verification: true,
            timeout: self.timeout,
        };
        match tokio::time::timeout(self.timeout, self.platform.get_assertion(request)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                debug!(error = %e, "biometric assertion failed or cancelled");
                false
            }
            Err(_) => {
                warn!("biometric assertion timed out");
                false
            }
        }
    }
}

fn fresh_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Scripted authenticator: fixed availability/verdict, records every
    /// request it sees.
    pub(crate) struct ScriptedAuthenticator {
        pub available: bool,
        pub approve: bool,
        pub created: Mutex<Vec<CredentialRequest>>,
        pub asserted: Mutex<Vec<AssertionRequest>>,
    }

    impl ScriptedAuthenticator {
        pub(crate) fn approving() -> Self {
            Self {
                available: true,
                approve: true,
                created: Mutex::new(Vec::new()),
                asserted: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn denying() -> Self {
            Self {
                approve: false,
                ..Self::approving()
            }
        }

        pub(crate) fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::approving()
            }
        }
    }

    #[async_trait]
    impl PlatformAuthenticator for ScriptedAuthenticator {
        async fn is_available(&self) -> bool {
            self.available
        }

        async fn create_credential(&self, request: CredentialRequest) -> anyhow::Result<()> {
            self.created.lock().expect("lock").push(request);
            if self.approve {
                Ok(())
            } else {
                anyhow::bail!("user cancelled the credential dialog")
            }
        }

        async fn get_assertion(&self, request: AssertionRequest) -> anyhow::Result<()> {
            self.asserted.lock().expect("lock").push(request);
            if self.approve {
                Ok(())
            } else {
                anyhow::bail!("user cancelled the credential dialog")
            }
        }
    }

    /// Authenticator whose dialogs never resolve; exercises the timeout.
    pub(crate) struct StalledAuthenticator;

    #[async_trait]
    impl PlatformAuthenticator for StalledAuthenticator {
        async fn is_available(&self) -> bool {
            true
        }

        async fn create_credential(&self, _request: CredentialRequest) -> anyhow::Result<()> {
            std::future::pending().await
        }

        async fn get_assertion(&self, _request: AssertionRequest) -> anyhow::Result<()> {
            std::future::pending().await
        }
    }
}
