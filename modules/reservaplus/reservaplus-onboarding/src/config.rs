use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OnboardingClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for OnboardingClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8087/".to_owned()
}

fn default_timeout_ms() -> u64 {
    5_000
}
