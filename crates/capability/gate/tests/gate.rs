use api_contract::{BillboardRequest, CategoryRequest, StoreRequest};
use catalog_auth::IdentityResolver;
use catalog_gate::{FieldProblem, GateError, ResourceGate, ensure_exists};
use catalog_storage::{
    InMemoryCatalog, StorageError, StoreRecord, StoreStore, StoreUpdate,
};
use domain::{CallerIdentity, ResourceKind, StoreScope};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// token 即 user_id 的测试身份解析器。
struct StaticResolver;

impl IdentityResolver for StaticResolver {
    fn resolve(&self, bearer: Option<&str>) -> Option<CallerIdentity> {
        bearer.and_then(CallerIdentity::new)
    }
}

/// 记录归属查询次数的店铺存储。
struct CountingStores {
    inner: InMemoryCatalog,
    lookups: AtomicUsize,
}

#[async_trait::async_trait]
impl StoreStore for CountingStores {
    async fn list_stores(&self, owner: &CallerIdentity) -> Result<Vec<StoreRecord>, StorageError> {
        self.inner.list_stores(owner).await
    }

    async fn find_store(&self, store_id: &str) -> Result<Option<StoreRecord>, StorageError> {
        self.inner.find_store(store_id).await
    }

    async fn find_owned_store(
        &self,
        owner: &CallerIdentity,
        store_id: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_owned_store(owner, store_id).await
    }

    async fn create_store(
        &self,
        owner: &CallerIdentity,
        record: StoreRecord,
    ) -> Result<StoreRecord, StorageError> {
        self.inner.create_store(owner, record).await
    }

    async fn update_store(
        &self,
        scope: &StoreScope,
        update: StoreUpdate,
    ) -> Result<Option<StoreRecord>, StorageError> {
        self.inner.update_store(scope, update).await
    }

    async fn delete_store(&self, scope: &StoreScope) -> Result<Option<StoreRecord>, StorageError> {
        self.inner.delete_store(scope).await
    }
}

/// 查询即失败的店铺存储。
struct BrokenStores;

#[async_trait::async_trait]
impl StoreStore for BrokenStores {
    async fn list_stores(&self, _owner: &CallerIdentity) -> Result<Vec<StoreRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn find_store(&self, _store_id: &str) -> Result<Option<StoreRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn find_owned_store(
        &self,
        _owner: &CallerIdentity,
        _store_id: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn create_store(
        &self,
        _owner: &CallerIdentity,
        _record: StoreRecord,
    ) -> Result<StoreRecord, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn update_store(
        &self,
        _scope: &StoreScope,
        _update: StoreUpdate,
    ) -> Result<Option<StoreRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }

    async fn delete_store(&self, _scope: &StoreScope) -> Result<Option<StoreRecord>, StorageError> {
        Err(StorageError::new("connection refused"))
    }
}

fn counting_gate() -> (ResourceGate, Arc<CountingStores>) {
    let stores = Arc::new(CountingStores {
        inner: InMemoryCatalog::with_default_store(),
        lookups: AtomicUsize::new(0),
    });
    let gate = ResourceGate::new(Arc::new(StaticResolver), stores.clone());
    (gate, stores)
}

fn billboard(label: &str, image_url: &str) -> BillboardRequest {
    BillboardRequest {
        label: Some(label.to_string()),
        image_url: Some(image_url.to_string()),
    }
}

#[tokio::test]
async fn missing_identity_skips_ownership_lookup() {
    let (gate, stores) = counting_gate();
    let err = gate
        .authorize_mutation(None, "store-1", ResourceKind::Billboard, &billboard("Summer", "x"))
        .await
        .expect_err("unauthenticated");
    assert!(matches!(err, GateError::Unauthenticated));
    assert_eq!(stores.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn foreign_store_is_forbidden() {
    let (gate, _) = counting_gate();
    let body = CategoryRequest {
        name: Some("Shoes".to_string()),
        billboard_id: Some("b1".to_string()),
    };
    let err = gate
        .authorize_mutation(Some("user-2"), "store-1", ResourceKind::Category, &body)
        .await
        .expect_err("forbidden");
    assert!(matches!(err, GateError::Forbidden));
}

#[tokio::test]
async fn missing_store_is_forbidden() {
    let (gate, _) = counting_gate();
    let err = gate
        .authorize(Some("user-1"), "store-404")
        .await
        .expect_err("forbidden");
    assert!(matches!(err, GateError::Forbidden));

    let err = gate.authorize(Some("user-1"), "").await.expect_err("blank");
    assert!(matches!(err, GateError::Forbidden));
}

#[tokio::test]
async fn ownership_is_checked_before_fields() {
    let (gate, _) = counting_gate();
    let err = gate
        .authorize_mutation(
            Some("user-2"),
            "store-1",
            ResourceKind::Billboard,
            &BillboardRequest::default(),
        )
        .await
        .expect_err("forbidden");
    assert!(matches!(err, GateError::Forbidden));
}

#[tokio::test]
async fn empty_label_is_invalid_input() {
    let (gate, _) = counting_gate();
    let err = gate
        .authorize_mutation(Some("user-1"), "store-1", ResourceKind::Billboard, &billboard("", "x"))
        .await
        .expect_err("invalid");
    match err {
        GateError::InvalidInput { field, problem } => {
            assert_eq!(field, "label");
            assert_eq!(problem, FieldProblem::Required);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn owner_with_complete_body_gets_scope() {
    let (gate, stores) = counting_gate();
    let scope = gate
        .authorize_mutation(
            Some("user-1"),
            "store-1",
            ResourceKind::Billboard,
            &billboard("Summer", "https://cdn.example.com/b.png"),
        )
        .await
        .expect("scope");
    assert_eq!(scope, StoreScope::new("user-1", "store-1"));
    assert_eq!(stores.lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lookup_failure_is_internal() {
    let gate = ResourceGate::new(Arc::new(StaticResolver), Arc::new(BrokenStores));
    let err = gate
        .authorize(Some("user-1"), "store-1")
        .await
        .expect_err("internal");
    assert!(matches!(err, GateError::Internal(_)));
}

#[test]
fn store_creation_needs_identity_and_name() {
    let (gate, _) = counting_gate();
    let body = StoreRequest {
        name: Some("Outlet".to_string()),
    };
    let err = gate
        .authorize_store_creation(None, &body)
        .expect_err("unauthenticated");
    assert!(matches!(err, GateError::Unauthenticated));

    let err = gate
        .authorize_store_creation(Some("user-1"), &StoreRequest::default())
        .expect_err("name");
    assert_eq!(err.field(), Some("name"));

    let caller = gate
        .authorize_store_creation(Some("user-1"), &body)
        .expect("caller");
    assert_eq!(caller.user_id(), "user-1");
}

#[test]
fn missing_record_is_not_found() {
    let err = ensure_exists::<StoreRecord>(None, ResourceKind::Size).expect_err("missing");
    assert!(matches!(err, GateError::NotFound(ResourceKind::Size)));
    assert_eq!(ensure_exists(Some(3), ResourceKind::Size).expect("found"), 3);
}
