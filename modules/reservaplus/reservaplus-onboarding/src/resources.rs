use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProbeError;

/// Account-scoped collections consulted during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Organization,
    Professionals,
    Services,
}

impl Resource {
    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Organization => "api/organizations/me/",
            Self::Professionals => "api/organizations/professionals/",
            Self::Services => "api/organizations/services/",
        }
    }
}

/// HTTP-level outcome of one probe. A non-2xx status is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub success: bool,
    pub body: Vec<u8>,
}

impl FetchOutcome {
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            body: Vec::new(),
        }
    }

    /// Whether this is a successful response carrying at least one element.
    ///
    /// # Errors
    /// Returns `ProbeError::Decode` when a successful body is not JSON.
    pub fn has_items(&self) -> Result<bool, ProbeError> {
        if !self.success {
            return Ok(false);
        }
        Ok(collection_len(&serde_json::from_slice(&self.body)?) > 0)
    }
}

/// Length of a collection body: either a bare array or `{"results": [...]}`.
/// Any other shape counts as empty.
#[must_use]
pub fn collection_len(body: &Value) -> usize {
    match body {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .get("results")
            .and_then(Value::as_array)
            .map_or(0, Vec::len),
        _ => 0,
    }
}

#[async_trait]
pub trait OnboardingResources: Send + Sync {
    /// Probe one collection.
    ///
    /// # Errors
    /// Returns an error only for transport failures; HTTP error statuses are
    /// reported through `FetchOutcome::success`.
    async fn fetch(&self, resource: Resource) -> Result<FetchOutcome, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_shapes() {
        assert_eq!(collection_len(&json!([1, 2])), 2);
        assert_eq!(collection_len(&json!({ "results": [1] })), 1);
        assert_eq!(collection_len(&json!({ "results": "nope" })), 0);
        assert_eq!(collection_len(&json!({ "id": "org-1" })), 0);
        assert_eq!(collection_len(&json!(null)), 0);
    }

    #[test]
    fn test_failed_outcome_has_no_items_without_parsing() {
        let outcome = FetchOutcome {
            success: false,
            body: b"<html>502</html>".to_vec(),
        };
        assert!(!outcome.has_items().unwrap());
    }

    #[test]
    fn test_unparsable_success_is_error() {
        assert!(FetchOutcome::ok("not json").has_items().is_err());
    }
}
