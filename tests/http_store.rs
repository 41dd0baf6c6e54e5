use httpmock::prelude::*;
use site_admin::{AdminError, ConfigStore, HttpConfigStore, TomlConfig};

fn store_for(server: &MockServer) -> HttpConfigStore {
    let config = TomlConfig::from_str(&format!(
        r#"
        [store]
        base_url = "{}"
        "#,
        server.base_url()
    ))
    .unwrap();
    HttpConfigStore::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_carries_collection_specific_fields() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services");
        then.status(200).json_body(serde_json::json!([
            {"id": 4, "order": 1, "isActive": true, "title": "Individual therapy", "icon": "Brain"},
            {"id": 9, "order": 0, "title": "Couples therapy"}
        ]));
    });

    let store = store_for(&server);
    let items = store.fetch("services").await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, 4);
    assert_eq!(items[0].fields["title"], "Individual therapy");
    assert_eq!(items[0].fields["icon"], "Brain");
    // isActive defaults to true when the backend omits it.
    assert!(items[1].is_active);
}

#[tokio::test]
async fn test_fetch_non_success_is_a_fetch_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/services");
        then.status(503);
    });

    let store = store_for(&server);
    let err = store.fetch("services").await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::FetchFailure { status: 503, .. }
    ));
}

#[tokio::test]
async fn test_update_sends_partial_body_only() {
    let server = MockServer::start();
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/services/4")
            .json_body(serde_json::json!({"order": 2}));
        then.status(200).json_body(
            serde_json::json!({"id": 4, "order": 2, "isActive": true, "title": "Individual therapy"}),
        );
    });

    let store = store_for(&server);
    let updated = store
        .update("services", 4, serde_json::json!({"order": 2}))
        .await
        .unwrap();

    put_mock.assert();
    assert_eq!(updated.order, 2);
    assert_eq!(updated.fields["title"], "Individual therapy");
}

#[tokio::test]
async fn test_update_missing_item_is_stale() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/services/99");
        then.status(404);
    });

    let store = store_for(&server);
    let err = store
        .update("services", 99, serde_json::json!({"order": 0}))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminError::StaleItem { id: 99, .. }
    ));
}

#[tokio::test]
async fn test_create_posts_fields_and_returns_item() {
    let server = MockServer::start();
    let post_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/photos")
            .json_body(serde_json::json!({"url": "/carousel/1.jpg", "order": 3}));
        then.status(201)
            .json_body(serde_json::json!({"id": 12, "order": 3, "isActive": true, "url": "/carousel/1.jpg"}));
    });

    let store = store_for(&server);
    let created = store
        .create(
            "photos",
            serde_json::json!({"url": "/carousel/1.jpg", "order": 3}),
        )
        .await
        .unwrap();

    post_mock.assert();
    assert_eq!(created.id, 12);
}

#[tokio::test]
async fn test_delete_missing_item_is_stale() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/photos/12");
        then.status(404);
    });

    let store = store_for(&server);
    let err = store.delete("photos", 12).await.unwrap_err();
    assert!(matches!(err, AdminError::StaleItem { id: 12, .. }));
}

#[tokio::test]
async fn test_delete_succeeds_on_no_content() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/photos/12");
        then.status(204);
    });

    let store = store_for(&server);
    store.delete("photos", 12).await.unwrap();
    delete_mock.assert();
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start();
    let config = TomlConfig::from_str(&format!(
        r#"
        [store]
        base_url = "{}/"
        "#,
        server.base_url()
    ))
    .unwrap();
    let get_mock = server.mock(|when, then| {
        when.method(GET).path("/faq");
        then.status(200).json_body(serde_json::json!([]));
    });

    let store = HttpConfigStore::new(&config).unwrap();
    let items = store.fetch("faq").await.unwrap();
    assert!(items.is_empty());
    get_mock.assert();
}
