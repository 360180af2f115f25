use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use reservaplus_sdk::{AccountStatus, PlanSummary};
use serde_json::{Value, json};

use super::clock::FixedClock;
use super::error::DomainError;
use super::keys::{organization_key, plan_key, profile_key, registration_key};
use super::service::{Service, ServiceConfig};
use super::store::{ItemKey, KeyValueStore, StoreItem};
use crate::infra::storage::MemoryStore;

const NOW: i64 = 1_700_000_000_000;

/// Memory store that records every call and can be told to fail.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryStore,
    gets: Mutex<Vec<ItemKey>>,
    queries: AtomicUsize,
    updates: Mutex<Vec<(ItemKey, StoreItem)>>,
    puts: AtomicUsize,
    fail_reads: bool,
    fail_updates: bool,
}

impl RecordingStore {
    fn with(items: Vec<(ItemKey, Value)>) -> Self {
        let store = Self::default();
        for (key, value) in items {
            store.inner.insert(key, object(value));
        }
        store
    }

    fn total_calls(&self) -> usize {
        self.gets.lock().len()
            + self.queries.load(Ordering::SeqCst)
            + self.updates.lock().len()
            + self.puts.load(Ordering::SeqCst)
    }

    fn was_read(&self, key: &ItemKey) -> bool {
        self.gets.lock().iter().any(|k| k == key)
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get_item(&self, key: &ItemKey) -> anyhow::Result<Option<StoreItem>> {
        self.gets.lock().push(key.clone());
        if self.fail_reads {
            anyhow::bail!("store unavailable");
        }
        self.inner.get_item(key).await
    }

    async fn query_partition(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> anyhow::Result<Vec<StoreItem>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            anyhow::bail!("store unavailable");
        }
        self.inner.query_partition(partition, sort_prefix).await
    }

    async fn update_fields(&self, key: &ItemKey, fields: StoreItem) -> anyhow::Result<()> {
        self.updates.lock().push((key.clone(), fields.clone()));
        if self.fail_updates {
            anyhow::bail!("conditional write rejected");
        }
        self.inner.update_fields(key, fields).await
    }

    async fn put_item(&self, key: &ItemKey, item: StoreItem) -> anyhow::Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put_item(key, item).await
    }
}

fn object(value: Value) -> StoreItem {
    match value {
        Value::Object(map) => map,
        _ => StoreItem::new(),
    }
}

fn service(store: &Arc<RecordingStore>) -> Service {
    Service::new(
        store.clone(),
        Arc::new(FixedClock::at(NOW)),
        ServiceConfig::default(),
    )
}

fn registration(plan_id: &str, expires_at: i64) -> Value {
    json!({
        "token": "abc123",
        "plan_id": plan_id,
        "email": "ana@example.com",
        "status": "pending",
        "GSI1PK": "EMAIL#ana@example.com",
        "user_data": {
            "first_name": "Ana",
            "last_name": "Rojas",
            "organization_name": "Spa Rojas",
            "password_hint": "secret"
        },
        "expires_at": expires_at
    })
}

fn stored_plan(id: &str, order: Option<i64>) -> (ItemKey, Value) {
    let mut value = json!({ "plan_id": id, "name": id, "price_monthly": 1000 });
    if let (Some(order), Value::Object(map)) = (order, &mut value) {
        map.insert("display_order".to_owned(), json!(order));
    }
    (plan_key(id), value)
}

fn ids(plans: &[PlanSummary]) -> Vec<&str> {
    plans.iter().map(|p| p.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Plan catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_catalog_falls_back_to_builtin_plans() {
    let store = Arc::new(RecordingStore::default());
    let plans = service(&store).list_active_plans().await.unwrap();

    assert_eq!(ids(&plans), vec!["basico", "profesional", "empresarial"]);
    assert_eq!(store.queries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stored_plans_sorted_by_display_order() {
    let store = Arc::new(RecordingStore::with(vec![
        stored_plan("a-late", Some(3)),
        stored_plan("b-first", Some(1)),
        stored_plan("c-middle", Some(2)),
    ]));
    let plans = service(&store).list_active_plans().await.unwrap();

    assert_eq!(ids(&plans), vec!["b-first", "c-middle", "a-late"]);
    assert!(plans.windows(2).all(|w| w[0].display_order <= w[1].display_order));
}

#[tokio::test]
async fn test_missing_display_order_defaults_to_zero_and_ties_keep_order() {
    // Memory store returns items in sort-key order: a, b, c, d.
    let store = Arc::new(RecordingStore::with(vec![
        stored_plan("a", Some(1)),
        stored_plan("b", None),
        stored_plan("c", Some(1)),
        stored_plan("d", None),
    ]));
    let plans = service(&store).list_active_plans().await.unwrap();

    assert_eq!(ids(&plans), vec!["b", "d", "a", "c"]);
    assert_eq!(plans[0].display_order, 0);
}

#[tokio::test]
async fn test_undecodable_plan_is_skipped() {
    let store = Arc::new(RecordingStore::with(vec![
        stored_plan("good", Some(1)),
        (plan_key("bad"), json!({ "name": "Bad", "display_order": "first" })),
    ]));
    let plans = service(&store).list_active_plans().await.unwrap();

    assert_eq!(ids(&plans), vec!["good"]);
}

#[tokio::test]
async fn test_plans_store_failure_is_infrastructure_error() {
    let store = Arc::new(RecordingStore {
        fail_reads: true,
        ..RecordingStore::default()
    });
    let err = service(&store).list_active_plans().await.unwrap_err();

    assert!(matches!(err, DomainError::Store(_)));
    assert!(err.is_infrastructure());
}

#[tokio::test]
async fn test_seed_plans_then_list_returns_seeded_catalog() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(&store);
    let catalog = crate::domain::catalog::static_catalog();

    let written = svc.seed_plans(&catalog).await.unwrap();
    assert_eq!(written, 3);
    assert_eq!(store.puts.load(Ordering::SeqCst), 3);

    let plans = svc.list_active_plans().await.unwrap();
    assert_eq!(plans, catalog);
}

// ---------------------------------------------------------------------------
// Registration status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_token_is_validation_error_without_store_access() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(&store);

    for token in ["", "   "] {
        let err = svc.check_registration(token).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_oversized_token_is_validation_error() {
    let store = Arc::new(RecordingStore::default());
    let token = "x".repeat(ServiceConfig::default().max_token_length + 1);

    let err = service(&store).check_registration(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_unknown_token_is_invalid_not_expired() {
    let store = Arc::new(RecordingStore::default());
    let err = service(&store).check_registration("abc123").await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidToken));
    assert!(store.was_read(&registration_key("abc123")));
}

#[tokio::test]
async fn test_token_is_looked_up_verbatim() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("basic", NOW + 1000),
    )]));
    let err = service(&store).check_registration(" abc123").await.unwrap_err();

    assert!(matches!(err, DomainError::InvalidToken));
    assert!(store.was_read(&registration_key(" abc123")));
    assert!(!store.was_read(&registration_key("abc123")));
}

#[tokio::test]
async fn test_past_deadline_is_expired_not_invalid() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("basic", NOW - 1000),
    )]));
    let err = service(&store).check_registration("abc123").await.unwrap_err();

    assert!(matches!(err, DomainError::TokenExpired));
}

#[tokio::test]
async fn test_deadline_equal_to_now_is_still_valid() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("basic", NOW),
    )]));
    let status = service(&store).check_registration("abc123").await.unwrap();

    assert_eq!(status.expires_at.timestamp_millis(), NOW);
}

#[tokio::test]
async fn test_premium_registration_projects_fixed_plan() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("premium", NOW + 100_000),
    )]));
    let status = service(&store).check_registration("abc123").await.unwrap();

    assert_eq!(status.selected_plan.id, "premium");
    assert_eq!(status.selected_plan.name, "Plan Premium");
    assert_eq!(status.selected_plan.price_monthly, 50_000);
    assert_eq!(status.expires_at.timestamp_millis(), NOW + 100_000);
}

#[tokio::test]
async fn test_basic_registration_is_free() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("basic", NOW + 1),
    )]));
    let status = service(&store).check_registration("abc123").await.unwrap();

    assert_eq!(status.selected_plan.id, "basic");
    assert_eq!(status.selected_plan.name, "Plan B\u{e1}sico");
    assert_eq!(status.selected_plan.price_monthly, 0);
}

#[tokio::test]
async fn test_catalog_plan_id_still_maps_to_premium() {
    // The registration projection is independent of the catalog contents.
    let store = Arc::new(RecordingStore::with(vec![
        stored_plan("basico", Some(1)),
        (registration_key("abc123"), registration("basico", NOW + 1)),
    ]));
    let status = service(&store).check_registration("abc123").await.unwrap();

    assert_eq!(status.selected_plan.name, "Plan Premium");
    assert_eq!(status.selected_plan.price_monthly, 50_000);
}

#[tokio::test]
async fn test_registration_user_data_is_whitelisted() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("premium", NOW + 1),
    )]));
    let status = service(&store).check_registration("abc123").await.unwrap();
    let user = status.user_data;

    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.first_name, "Ana");
    assert_eq!(user.last_name, "Rojas");
    assert_eq!(user.organization_name, "Spa Rojas");
}

#[tokio::test]
async fn test_registration_email_falls_back_to_user_data() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        json!({
            "plan_id": "basic",
            "user_data": { "email": "nested@example.com" },
            "expires_at": NOW + 1
        }),
    )]));
    let status = service(&store).check_registration("abc123").await.unwrap();

    assert_eq!(status.user_data.email, "nested@example.com");
    assert_eq!(status.user_data.first_name, "");
}

#[tokio::test]
async fn test_registration_never_writes() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        registration("premium", NOW + 1),
    )]));
    let svc = service(&store);
    svc.check_registration("abc123").await.unwrap();
    let _ = svc.check_registration("missing").await;

    assert!(store.updates.lock().is_empty());
    assert_eq!(store.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_registration_without_deadline_is_corrupt() {
    let store = Arc::new(RecordingStore::with(vec![(
        registration_key("abc123"),
        json!({ "token": "abc123", "plan_id": "basic" }),
    )]));
    let err = service(&store).check_registration("abc123").await.unwrap_err();

    assert!(matches!(err, DomainError::CorruptRecord { entity: "registration", .. }));
    assert!(err.is_infrastructure());
}

// ---------------------------------------------------------------------------
// Account status
// ---------------------------------------------------------------------------

fn profile(completed: bool, organization_id: Option<&str>) -> Value {
    json!({
        "account_id": "u1",
        "email": "u1@example.com",
        "first_name": "Ana",
        "last_name": "Rojas",
        "role": "owner",
        "organization_id": organization_id,
        "organization_name": "Spa Rojas",
        "onboarding_completed": completed,
        "subscription_status": "trial",
        "trial_end": "2026-12-01",
        "last_login": 1,
        "entity_type": "USER"
    })
}

fn organization() -> Value {
    json!({
        "name": "Spa Rojas",
        "industry_template": "spa",
        "email": "hola@sparojas.cl",
        "phone": "+56 9 1234 5678",
        "subscription_status": "active",
        "trial_end": "2026-12-01"
    })
}

#[tokio::test]
async fn test_empty_account_id_is_unauthenticated_without_store_access() {
    let store = Arc::new(RecordingStore::default());
    let err = service(&store)
        .check_account_status("", "x@example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Unauthenticated(_)));
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_no_profile_is_new_account_without_write() {
    let store = Arc::new(RecordingStore::default());
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    match status {
        AccountStatus::NewAccount { user_info } => {
            assert_eq!(user_info.id, "u1");
            assert_eq!(user_info.email, "u1@example.com");
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(store.updates.lock().is_empty());
    assert_eq!(store.puts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_pending_onboarding_uses_profile_fields_only() {
    let store = Arc::new(RecordingStore::with(vec![
        (profile_key("u1"), profile(false, Some("org-1"))),
        (organization_key("org-1"), organization()),
    ]));
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    assert!(status.needs_onboarding());
    assert!(status.has_profile());
    match status {
        AccountStatus::OnboardingPending { organization } => {
            assert_eq!(organization.id.as_deref(), Some("org-1"));
            assert_eq!(organization.name.as_deref(), Some("Spa Rojas"));
            assert_eq!(organization.role.as_deref(), Some("owner"));
            assert_eq!(organization.subscription_status.as_deref(), Some("trial"));
        }
        other => panic!("unexpected status: {other:?}"),
    }
    assert!(!store.was_read(&organization_key("org-1")));
    assert!(store.updates.lock().is_empty());
}

#[tokio::test]
async fn test_null_onboarding_flag_means_pending() {
    let mut stored = profile(true, Some("org-1"));
    stored["onboarding_completed"] = Value::Null;
    stored["first_name"] = Value::Null;
    let store = Arc::new(RecordingStore::with(vec![(profile_key("u1"), stored)]));

    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    assert!(matches!(status, AccountStatus::OnboardingPending { .. }));
    assert!(store.updates.lock().is_empty());
}

#[tokio::test]
async fn test_completed_onboarding_joins_organization_and_stamps_login() {
    let store = Arc::new(RecordingStore::with(vec![
        (profile_key("u1"), profile(true, Some("org-1"))),
        (organization_key("org-1"), organization()),
    ]));
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    match status {
        AccountStatus::Active {
            profile,
            organization,
        } => {
            assert_eq!(profile.account_id, "u1");
            // Response carries the pre-update read.
            assert_eq!(profile.last_login, Some(1));
            let org = organization.unwrap();
            assert_eq!(org.id, "org-1");
            assert_eq!(org.industry_template.as_deref(), Some("spa"));
        }
        other => panic!("unexpected status: {other:?}"),
    }

    let updates = store.updates.lock();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, profile_key("u1"));
    assert_eq!(updates[0].1["last_login"], json!(NOW));
    drop(updates);

    let stored = store.inner.get(&profile_key("u1")).unwrap();
    assert_eq!(stored["last_login"], json!(NOW));
}

#[tokio::test]
async fn test_dangling_organization_is_null_not_error() {
    let store = Arc::new(RecordingStore::with(vec![(
        profile_key("u1"),
        profile(true, Some("gone")),
    )]));
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    assert!(matches!(
        status,
        AccountStatus::Active {
            organization: None,
            ..
        }
    ));
    assert!(store.was_read(&organization_key("gone")));
}

#[tokio::test]
async fn test_completed_without_organization_skips_lookup() {
    let store = Arc::new(RecordingStore::with(vec![(
        profile_key("u1"),
        profile(true, None),
    )]));
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    assert!(!status.needs_onboarding());
    assert_eq!(store.gets.lock().len(), 1);
    assert_eq!(store.updates.lock().len(), 1);
}

#[tokio::test]
async fn test_failed_login_stamp_does_not_fail_request() {
    let store = Arc::new(RecordingStore {
        fail_updates: true,
        ..RecordingStore::with(vec![(profile_key("u1"), profile(true, None))])
    });
    let status = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap();

    assert!(matches!(status, AccountStatus::Active { .. }));
    assert_eq!(store.updates.lock().len(), 1);
}

#[tokio::test]
async fn test_profile_read_failure_is_infrastructure_error() {
    let store = Arc::new(RecordingStore {
        fail_reads: true,
        ..RecordingStore::default()
    });
    let err = service(&store)
        .check_account_status("u1", "u1@example.com")
        .await
        .unwrap_err();

    assert!(err.is_infrastructure());
}
