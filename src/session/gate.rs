//! Gate evaluation and the persisted onboarding flag.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::store::StorageCapability;

/// Keys in the settings store.
pub mod settings_keys {
    /// Flag set once the user finishes onboarding. Never cleared.
    pub const ONBOARDING_COMPLETED: &str = "onboardingCompleted";
}

/// The gate's answer for one navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GateDecision {
    /// Let the navigation through.
    Proceed,
    /// Send the client to `location` instead.
    Redirect { location: String },
}

/// Decides whether a navigation may proceed or must detour to onboarding.
///
/// One instance is created at startup with whatever storage the environment
/// provides. Without storage the flag cannot be read, so every navigation
/// proceeds.
pub struct SessionGate {
    storage: StorageCapability,
    onboarding_path: String,
}

impl SessionGate {
    pub fn new(storage: StorageCapability, onboarding_path: impl Into<String>) -> Self {
        Self {
            storage,
            onboarding_path: onboarding_path.into(),
        }
    }

    /// The path incomplete sessions are redirected to.
    pub fn onboarding_path(&self) -> &str {
        &self.onboarding_path
    }

    /// Whether the persisted flag reads as completed.
    ///
    /// Absent flag, unreadable store, or an unrecognized value all count as
    /// not completed.
    pub async fn completed(&self) -> bool {
        let Some(store) = self.storage.store() else {
            return false;
        };
        match store.get(settings_keys::ONBOARDING_COMPLETED).await {
            Ok(value) => value.as_deref().is_some_and(flag_completed),
            Err(e) => {
                warn!(error = %e, "Failed to read onboarding flag, treating as not completed");
                false
            }
        }
    }

    /// Decide the navigation to `target`.
    ///
    /// With no storage capability the gate always proceeds. Otherwise an
    /// incomplete session is redirected to the onboarding path, except when
    /// it is already headed there.
    pub async fn evaluate(&self, target: &str) -> GateDecision {
        if !self.storage.is_available() {
            return GateDecision::Proceed;
        }
        if self.completed().await {
            return GateDecision::Proceed;
        }
        if target == self.onboarding_path {
            return GateDecision::Proceed;
        }
        debug!(target, "Redirecting incomplete session to onboarding");
        GateDecision::Redirect {
            location: self.onboarding_path.clone(),
        }
    }

    /// Persist the completion flag.
    ///
    /// Without a settings store this logs and succeeds; the session simply
    /// stays ungated, as it was all along.
    pub async fn complete(&self) -> Result<(), StorageError> {
        let Some(store) = self.storage.store() else {
            warn!("No settings store, onboarding completion not persisted");
            return Ok(());
        };
        store.set(settings_keys::ONBOARDING_COMPLETED, "true").await?;
        info!("Onboarding marked completed");
        Ok(())
    }
}

/// Parse a stored flag value. Only `"true"` and `"1"` (trimmed,
/// case-insensitive) count as completed.
fn flag_completed(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::store::{MemoryStore, SettingsStore};

    use super::*;

    const ONBOARDING: &str = "/onboarding";

    fn gate_with_store() -> (SessionGate, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(
            StorageCapability::Available(store.clone()),
            ONBOARDING,
        );
        (gate, store)
    }

    struct FailingStore;

    #[async_trait]
    impl SettingsStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Query("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Query("disk on fire".to_string()))
        }
    }

    #[test]
    fn flag_parsing_is_strict() {
        assert!(flag_completed("true"));
        assert!(flag_completed("TRUE"));
        assert!(flag_completed("  true "));
        assert!(flag_completed("1"));

        assert!(!flag_completed("false"));
        assert!(!flag_completed("0"));
        assert!(!flag_completed("yes"));
        assert!(!flag_completed(""));
        assert!(!flag_completed("truethy"));
    }

    #[tokio::test]
    async fn fresh_session_redirects_everywhere_but_onboarding() {
        let (gate, _store) = gate_with_store();

        for target in ["/", "/rides", "/profile", "/map"] {
            assert_eq!(
                gate.evaluate(target).await,
                GateDecision::Redirect {
                    location: ONBOARDING.to_string()
                },
                "target {target}"
            );
        }
        assert_eq!(gate.evaluate(ONBOARDING).await, GateDecision::Proceed);
    }

    #[tokio::test]
    async fn completed_session_proceeds_everywhere() {
        let (gate, _store) = gate_with_store();
        gate.complete().await.unwrap();

        for target in ["/", "/rides", ONBOARDING] {
            assert_eq!(
                gate.evaluate(target).await,
                GateDecision::Proceed,
                "target {target}"
            );
        }
        assert!(gate.completed().await);
    }

    #[tokio::test]
    async fn complete_writes_the_flag_key() {
        let (gate, store) = gate_with_store();
        assert!(!gate.completed().await);

        gate.complete().await.unwrap();
        assert_eq!(
            store
                .get(settings_keys::ONBOARDING_COMPLETED)
                .await
                .unwrap()
                .as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn malformed_flag_counts_as_not_completed() {
        let (gate, store) = gate_with_store();
        store
            .set(settings_keys::ONBOARDING_COMPLETED, "definitely")
            .await
            .unwrap();

        assert!(!gate.completed().await);
        assert_eq!(
            gate.evaluate("/rides").await,
            GateDecision::Redirect {
                location: ONBOARDING.to_string()
            }
        );
    }

    #[tokio::test]
    async fn without_storage_the_gate_stands_open() {
        let gate = SessionGate::new(StorageCapability::Unavailable, ONBOARDING);

        for target in ["/", "/rides", ONBOARDING] {
            assert_eq!(gate.evaluate(target).await, GateDecision::Proceed);
        }
        assert!(!gate.completed().await);
        // No store to write to, still not an error.
        gate.complete().await.unwrap();
    }

    #[tokio::test]
    async fn read_errors_degrade_to_not_completed() {
        let gate = SessionGate::new(
            StorageCapability::Available(Arc::new(FailingStore)),
            ONBOARDING,
        );

        assert!(!gate.completed().await);
        assert_eq!(
            gate.evaluate("/rides").await,
            GateDecision::Redirect {
                location: ONBOARDING.to_string()
            }
        );
        assert!(gate.complete().await.is_err());
    }

    #[test]
    fn decision_wire_format() {
        let json = serde_json::to_value(GateDecision::Proceed).unwrap();
        assert_eq!(json, serde_json::json!({"action": "proceed"}));

        let json = serde_json::to_value(GateDecision::Redirect {
            location: ONBOARDING.to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"action": "redirect", "location": "/onboarding"})
        );
    }
}
