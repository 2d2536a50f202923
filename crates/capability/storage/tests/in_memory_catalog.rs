use catalog_storage::{
    BillboardRecord, BillboardUpdate, CatalogStore, CategoryRecord, CategoryUpdate, ColorRecord,
    InMemoryCatalog, NamedValueUpdate, ProductFilter, ProductRecord, ProductStore, ProductUpdate,
    SizeRecord, StoreRecord, StoreStore, build_images,
};
use domain::{CallerIdentity, StoreScope};

fn scope(store_id: &str) -> StoreScope {
    StoreScope::new("user-1", store_id)
}

/// store-1 与 store-2 均属于 user-1，各自带一套广告牌/分类/尺码/颜色。
async fn seeded() -> InMemoryCatalog {
    let catalog = InMemoryCatalog::with_default_store();
    let owner = CallerIdentity::new("user-1").expect("identity");
    catalog
        .create_store(
            &owner,
            StoreRecord {
                store_id: "store-2".to_string(),
                user_id: "user-1".to_string(),
                name: "Second".to_string(),
                created_at_ms: 1,
                updated_at_ms: 1,
            },
        )
        .await
        .expect("store");
    for store_id in ["store-1", "store-2"] {
        let scope = scope(store_id);
        catalog
            .create(
                &scope,
                BillboardRecord {
                    billboard_id: format!("{store_id}-b1"),
                    store_id: store_id.to_string(),
                    label: "Summer".to_string(),
                    image_url: "https://cdn.example.com/b.png".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("billboard");
        catalog
            .create(
                &scope,
                CategoryRecord {
                    category_id: format!("{store_id}-c1"),
                    store_id: store_id.to_string(),
                    billboard_id: format!("{store_id}-b1"),
                    name: "Shoes".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("category");
        catalog
            .create(
                &scope,
                SizeRecord {
                    size_id: format!("{store_id}-s1"),
                    store_id: store_id.to_string(),
                    name: "Large".to_string(),
                    value: "L".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("size");
        catalog
            .create(
                &scope,
                ColorRecord {
                    color_id: format!("{store_id}-k1"),
                    store_id: store_id.to_string(),
                    name: "Black".to_string(),
                    value: "#000000".to_string(),
                    created_at_ms: 1,
                    updated_at_ms: 1,
                },
            )
            .await
            .expect("color");
    }
    catalog
}

fn product(id: &str, created_at_ms: i64) -> ProductRecord {
    ProductRecord {
        product_id: id.to_string(),
        store_id: "store-1".to_string(),
        category_id: "store-1-c1".to_string(),
        size_id: "store-1-s1".to_string(),
        color_id: "store-1-k1".to_string(),
        name: "Runner".to_string(),
        price: 59.0,
        is_featured: false,
        is_archived: false,
        images: build_images(id, &["https://cdn.example.com/p.png".to_string()], created_at_ms),
        created_at_ms,
        updated_at_ms: created_at_ms,
    }
}

fn product_update(image_urls: Vec<String>) -> ProductUpdate {
    ProductUpdate {
        name: "Runner v2".to_string(),
        price: 79.5,
        category_id: "store-1-c1".to_string(),
        size_id: "store-1-s1".to_string(),
        color_id: "store-1-k1".to_string(),
        is_featured: true,
        is_archived: false,
        image_urls,
    }
}

#[tokio::test]
async fn catalog_list_is_scoped_to_store() {
    let catalog = seeded().await;
    let billboards: Vec<BillboardRecord> = catalog.list("store-1").await.expect("list");
    assert_eq!(billboards.len(), 1);
    assert_eq!(billboards[0].billboard_id, "store-1-b1");
}

#[tokio::test]
async fn create_into_missing_store_fails() {
    let catalog = InMemoryCatalog::new();
    let err = catalog
        .create(
            &scope("store-404"),
            SizeRecord {
                size_id: "s9".to_string(),
                store_id: "store-404".to_string(),
                name: "Small".to_string(),
                value: "S".to_string(),
                created_at_ms: 0,
                updated_at_ms: 0,
            },
        )
        .await
        .expect_err("store missing");
    assert_eq!(err.to_string(), "store missing");
}

#[tokio::test]
async fn create_outside_scope_fails() {
    let catalog = seeded().await;
    let err = catalog
        .create(
            &scope("store-1"),
            SizeRecord {
                size_id: "s9".to_string(),
                store_id: "store-2".to_string(),
                name: "Small".to_string(),
                value: "S".to_string(),
                created_at_ms: 0,
                updated_at_ms: 0,
            },
        )
        .await
        .expect_err("mismatch");
    assert_eq!(err.to_string(), "store scope mismatch");
}

#[tokio::test]
async fn cross_store_update_leaves_record_unchanged() {
    let catalog = seeded().await;
    let updated: Option<BillboardRecord> = catalog
        .update(
            &scope("store-1"),
            "store-2-b1",
            BillboardUpdate {
                label: "Hijacked".to_string(),
                image_url: "https://evil.example.com/x.png".to_string(),
            },
        )
        .await
        .expect("update");
    assert!(updated.is_none());

    let kept: Option<BillboardRecord> = catalog.find("store-2-b1").await.expect("find");
    assert_eq!(kept.expect("exists").label, "Summer");
}

#[tokio::test]
async fn scoped_update_replaces_fields() {
    let catalog = seeded().await;
    let updated: SizeRecord = catalog
        .update(
            &scope("store-1"),
            "store-1-s1",
            NamedValueUpdate {
                name: "Extra Large".to_string(),
                value: "XL".to_string(),
            },
        )
        .await
        .expect("update")
        .expect("in scope");
    assert_eq!(updated.value, "XL");
    assert!(updated.updated_at_ms >= updated.created_at_ms);
}

#[tokio::test]
async fn cross_store_delete_returns_none() {
    let catalog = seeded().await;
    let deleted: Option<ColorRecord> = catalog
        .delete(&scope("store-1"), "store-2-k1")
        .await
        .expect("delete");
    assert!(deleted.is_none());
    let kept: Option<ColorRecord> = catalog.find("store-2-k1").await.expect("find");
    assert!(kept.is_some());
}

#[tokio::test]
async fn referenced_billboard_cannot_be_deleted() {
    let catalog = seeded().await;
    let err = CatalogStore::<BillboardRecord>::delete(&catalog, &scope("store-1"), "store-1-b1")
        .await
        .expect_err("in use");
    assert_eq!(err.to_string(), "billboard in use");

    let deleted: Option<CategoryRecord> = catalog
        .delete(&scope("store-1"), "store-1-c1")
        .await
        .expect("delete");
    assert_eq!(deleted.expect("deleted").name, "Shoes");
    let deleted: Option<BillboardRecord> = catalog
        .delete(&scope("store-1"), "store-1-b1")
        .await
        .expect("delete");
    assert!(deleted.is_some());
}

#[tokio::test]
async fn product_list_filters_and_excludes_archived() {
    let catalog = seeded().await;
    let scope = scope("store-1");
    catalog.create_product(&scope, product("p1", 10)).await.expect("p1");
    let mut featured = product("p2", 20);
    featured.is_featured = true;
    catalog.create_product(&scope, featured).await.expect("p2");
    let mut archived = product("p3", 30);
    archived.is_archived = true;
    catalog.create_product(&scope, archived).await.expect("p3");

    let all = catalog
        .list_products("store-1", &ProductFilter::default())
        .await
        .expect("list");
    let ids: Vec<&str> = all.iter().map(|item| item.product_id.as_str()).collect();
    assert_eq!(ids, vec!["p2", "p1"]);

    let only_featured = catalog
        .list_products(
            "store-1",
            &ProductFilter {
                featured_only: true,
                ..ProductFilter::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(only_featured.len(), 1);
    assert_eq!(only_featured[0].product_id, "p2");

    let other_color = catalog
        .list_products(
            "store-1",
            &ProductFilter {
                color_id: Some("store-2-k1".to_string()),
                ..ProductFilter::default()
            },
        )
        .await
        .expect("list");
    assert!(other_color.is_empty());

    let archived = catalog.find_product("p3").await.expect("find");
    assert!(archived.expect("exists").is_archived);
}

#[tokio::test]
async fn product_update_replaces_images() {
    let catalog = seeded().await;
    let scope = scope("store-1");
    catalog.create_product(&scope, product("p1", 10)).await.expect("create");

    let updated = catalog
        .update_product(
            &scope,
            "p1",
            product_update(vec![
                "https://cdn.example.com/a.png".to_string(),
                "https://cdn.example.com/b.png".to_string(),
            ]),
        )
        .await
        .expect("update")
        .expect("in scope");
    assert_eq!(updated.name, "Runner v2");
    assert_eq!(updated.images.len(), 2);
    assert!(updated.images.iter().all(|image| image.product_id == "p1"));
}

#[tokio::test]
async fn failed_product_update_keeps_previous_state() {
    let catalog = seeded().await;
    let scope = scope("store-1");
    let created = catalog.create_product(&scope, product("p1", 10)).await.expect("create");

    catalog
        .update_product(
            &scope,
            "p1",
            product_update(vec!["https://cdn.example.com/a.png".to_string(), " ".to_string()]),
        )
        .await
        .expect_err("blank url");

    let current = catalog.find_product("p1").await.expect("find").expect("exists");
    assert_eq!(current, created);
}

#[tokio::test]
async fn product_in_other_store_is_not_touched() {
    let catalog = seeded().await;
    catalog
        .create_product(&scope("store-1"), product("p1", 10))
        .await
        .expect("create");

    let updated = catalog
        .update_product(&scope("store-2"), "p1", product_update(vec![]))
        .await
        .expect("update");
    assert!(updated.is_none());
    let deleted = catalog
        .delete_product(&scope("store-2"), "p1")
        .await
        .expect("delete");
    assert!(deleted.is_none());

    let deleted = catalog
        .delete_product(&scope("store-1"), "p1")
        .await
        .expect("delete")
        .expect("in scope");
    assert_eq!(deleted.images.len(), 1);
    assert!(catalog.find_product("p1").await.expect("find").is_none());
}

#[tokio::test]
async fn referenced_size_cannot_be_deleted() {
    let catalog = seeded().await;
    catalog
        .create_product(&scope("store-1"), product("p1", 10))
        .await
        .expect("create");
    let err = CatalogStore::<SizeRecord>::delete(&catalog, &scope("store-1"), "store-1-s1")
        .await
        .expect_err("in use");
    assert_eq!(err.to_string(), "size in use");
}

#[tokio::test]
async fn category_must_reference_billboard_in_same_store() {
    let catalog = seeded().await;
    let err = catalog
        .create(
            &scope("store-1"),
            CategoryRecord {
                category_id: "c9".to_string(),
                store_id: "store-1".to_string(),
                billboard_id: "ghost-billboard".to_string(),
                name: "Boots".to_string(),
                created_at_ms: 0,
                updated_at_ms: 0,
            },
        )
        .await
        .expect_err("missing billboard");
    assert_eq!(err.to_string(), "billboard reference invalid");
    let missing: Option<CategoryRecord> = catalog.find("c9").await.expect("find");
    assert!(missing.is_none());

    let err = CatalogStore::<CategoryRecord>::update(
        &catalog,
        &scope("store-1"),
        "store-1-c1",
        CategoryUpdate {
            name: "Boots".to_string(),
            billboard_id: "store-2-b1".to_string(),
        },
    )
    .await
    .expect_err("foreign billboard");
    assert_eq!(err.to_string(), "billboard reference invalid");
    let kept: Option<CategoryRecord> = catalog.find("store-1-c1").await.expect("find");
    let kept = kept.expect("exists");
    assert_eq!(kept.name, "Shoes");
    assert_eq!(kept.billboard_id, "store-1-b1");
}

#[tokio::test]
async fn product_must_reference_records_in_same_store() {
    let catalog = seeded().await;
    let scope = scope("store-1");
    let mut foreign_size = product("p1", 10);
    foreign_size.size_id = "store-2-s1".to_string();
    let err = catalog
        .create_product(&scope, foreign_size)
        .await
        .expect_err("foreign size");
    assert_eq!(err.to_string(), "size reference invalid");
    assert!(catalog.find_product("p1").await.expect("find").is_none());

    let created = catalog.create_product(&scope, product("p1", 10)).await.expect("create");
    let mut update = product_update(vec!["https://cdn.example.com/a.png".to_string()]);
    update.color_id = "ghost-color".to_string();
    let err = catalog
        .update_product(&scope, "p1", update)
        .await
        .expect_err("missing color");
    assert_eq!(err.to_string(), "color reference invalid");
    let current = catalog.find_product("p1").await.expect("find").expect("exists");
    assert_eq!(current, created);
}
