#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use larder_api::types::{IngredientPayload, RecipeDraft, SortOrder};
use larder_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_recipes_pagination_params() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [
            { "id": 1, "name": "Chicken Soup", "sku": "SOUP-001", "cogs": 12.5 },
            { "id": 2, "name": "Beef Rendang", "sku": "MAIN-014", "cogs": 31.0 },
        ],
        "meta": { "totalData": 12, "totalPages": 3, "current_page": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "5"))
        .and(query_param("search", "chicken"))
        .and(query_param("sort", "name"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_recipes(1, 5, "chicken", SortOrder::Asc, "name")
        .await
        .unwrap();

    assert_eq!(page.meta.total_data, 12);
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.current_page, 1);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].name, "Chicken Soup");
    assert_eq!(page.data[1].sku, "MAIN-014");
}

#[tokio::test]
async fn test_list_recipes_empty_page() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [],
        "meta": { "totalData": 0, "totalPages": 0, "current_page": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_recipes(1, 5, "", SortOrder::Desc, "name")
        .await
        .unwrap();

    assert_eq!(page.meta.total_data, 0);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_get_recipe_detail() {
    let (server, client) = setup().await;

    let body = json!({
        "recipe": { "id": 7, "name": "Chicken Soup", "sku": "SOUP-001", "cogs": 12.5 },
        "ingredients": [
            { "id": 41, "item": "Chicken Breast", "quantity": 0.5 },
            { "id": 42, "item": "Carrot", "quantity": 2.0 },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/recipes/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let detail = client.get_recipe_detail(7).await.unwrap();

    assert_eq!(detail.recipe.id, 7);
    assert_eq!(detail.ingredients.len(), 2);
    assert_eq!(detail.ingredients[1].id, 42);
    assert_eq!(detail.ingredients[1].item, "Carrot");
}

#[tokio::test]
async fn test_delete_recipe() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/recipes/7"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_recipe(7).await.unwrap();
}

#[tokio::test]
async fn test_create_ingredient_payload() {
    let (server, client) = setup().await;

    let payload = IngredientPayload {
        recipe_id: 7,
        inventory_id: 3,
        quantity: 1.5,
    };

    let body = json!({ "id": 91, "item": "Flour", "quantity": 1.5 });

    Mock::given(method("POST"))
        .and(path("/ingredients"))
        .and(body_json(json!({
            "recipe_id": 7,
            "inventory_id": 3,
            "quantity": 1.5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&body))
        .mount(&server)
        .await;

    let created = client.create_ingredient(&payload).await.unwrap();

    assert_eq!(created.id, 91);
    assert_eq!(created.item, "Flour");
}

#[tokio::test]
async fn test_update_ingredient() {
    let (server, client) = setup().await;

    let payload = IngredientPayload {
        recipe_id: 7,
        inventory_id: 3,
        quantity: 2.0,
    };

    let body = json!({ "id": 42, "item": "Carrot", "quantity": 2.0 });

    Mock::given(method("PUT"))
        .and(path("/ingredients/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let updated = client.update_ingredient(42, &payload).await.unwrap();

    assert_eq!(updated.id, 42);
    assert!((updated.quantity - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_delete_ingredient() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/ingredients/42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_ingredient(42).await.unwrap();
}

#[tokio::test]
async fn test_list_inventory_extra_fields_preserved() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [
            { "id": 1, "item": "Flour", "qty": 10.0, "unit": "kg", "supplier": "Millers Co" },
        ],
        "meta": { "totalData": 1, "totalPages": 1, "current_page": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/inventory"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .and(query_param("sort", "id"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_inventory(1, 100, "", SortOrder::Asc, "id")
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].item, "Flour");
    assert!((page.data[0].qty - 10.0).abs() < f64::EPSILON);
    assert_eq!(
        page.data[0].extra.get("unit").and_then(|v| v.as_str()),
        Some("kg")
    );
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/recipes/999"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Recipe not found" })),
        )
        .mount(&server)
        .await;

    let result = client.get_recipe_detail(999).await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ..
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Recipe not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_error_422_validation_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/recipes"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "SKU already in use",
            "code": "VALIDATION_ERROR"
        })))
        .mount(&server)
        .await;

    let draft = RecipeDraft {
        name: "Chicken Soup".into(),
        sku: "SOUP-001".into(),
        cogs: 12.5,
    };

    let result = client.create_recipe(&draft).await;

    match result {
        Err(Error::Api {
            status,
            ref message,
            ref code,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "SKU already in use");
            assert_eq!(code.as_deref(), Some("VALIDATION_ERROR"));
        }
        other => panic!("expected Api 422 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_500_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_recipes(1, 5, "", SortOrder::Asc, "name").await;

    match result {
        Err(Error::Api {
            status, ref code, ..
        }) => {
            assert_eq!(status, 500);
            assert!(code.is_none());
        }
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_deserialization_error_keeps_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/recipes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.get_recipe_detail(1).await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => {
            assert_eq!(body, "not json");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
