use serde::{Deserialize, Serialize};

/// Module configuration, nested under the server's top-level config.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReservaPlusConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    DynamoDb,
    Sql,
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub dynamodb: DynamoDbConfig,
    #[serde(default)]
    pub sql: SqlConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DynamoDbConfig {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Falls back to the AWS default provider chain when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint override, e.g. `http://localhost:4566` for LocalStack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            region: None,
            endpoint: None,
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    #[default]
    Hs256,
    Rs256,
}

/// Bearer token verification settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default)]
    pub algorithm: JwtAlgorithm,

    /// Shared secret for HS256. Never printed.
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,

    /// PEM-encoded public key for RS256.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_pem: Option<String>,

    /// Accepted `iss` values. Empty accepts any issuer.
    #[serde(default)]
    pub issuers: Vec<String>,

    /// Accepted `aud` values. Empty skips the audience check.
    #[serde(default)]
    pub audiences: Vec<String>,

    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            algorithm: JwtAlgorithm::default(),
            secret: None,
            public_key_pem: None,
            issuers: Vec::new(),
            audiences: Vec::new(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrationConfig {
    #[serde(default = "default_max_token_length")]
    pub max_token_length: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            max_token_length: default_max_token_length(),
        }
    }
}

fn default_table_name() -> String {
    "reservaplus".to_owned()
}

fn default_database_url() -> String {
    "sqlite::memory:".to_owned()
}

fn default_leeway_secs() -> u64 {
    60
}

fn default_max_token_length() -> usize {
    512
}
