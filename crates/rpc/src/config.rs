//! Application configuration
//!
//! The key comes from the environment. The insecure demo key is never a
//! silent default: it is only used when `allow_insecure_demo_key` is set and
//! the key variable is absent.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tollchain_crypto::{CipherKey, CryptoError, DEFAULT_KEY_ENV_VAR};
use tollchain_engine::Acknowledgment;

/// How batch runs answer gates that wait for the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OverspeedPolicy {
    /// Answer CONFIRM on the driver's behalf
    Confirm,
    /// Answer REJECT on the driver's behalf
    Reject,
    /// Leave the gate open; the record is not dispatched
    #[default]
    Skip,
}

impl OverspeedPolicy {
    pub fn acknowledgment(&self) -> Option<Acknowledgment> {
        match self {
            OverspeedPolicy::Confirm => Some(Acknowledgment::Confirm),
            OverspeedPolicy::Reject => Some(Acknowledgment::Reject),
            OverspeedPolicy::Skip => None,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment variable holding the 64-hex-char key
    #[serde(default = "default_key_env_var")]
    pub key_env_var: String,

    /// Fall back to the INSECURE demo key when the variable is absent
    #[serde(default)]
    pub allow_insecure_demo_key: bool,

    #[serde(default)]
    pub overspeed_policy: OverspeedPolicy,
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_env_var: default_key_env_var(),
            allow_insecure_demo_key: false,
            overspeed_policy: OverspeedPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Resolve the cipher key.
    ///
    /// A present but malformed key is always an error, even when the demo
    /// fallback is allowed. Only an absent variable falls back.
    pub fn resolve_key(&self) -> Result<CipherKey, CryptoError> {
        match std::env::var_os(&self.key_env_var) {
            Some(_) => CipherKey::from_env(&self.key_env_var),
            None if self.allow_insecure_demo_key => Ok(CipherKey::insecure_demo()),
            None => Err(CryptoError::Config(format!(
                "{} is not set (pass --insecure-demo-key to use the demo key)",
                self.key_env_var
            ))),
        }
    }
}
