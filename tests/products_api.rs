//! End-to-end tests for the product routes.

use std::collections::HashMap;

use product_api::catalog::query::ProductPage;
use product_api::catalog::NewProduct;
use product_api::http::ErrorBody;
use product_api::Product;
use reqwest::StatusCode;
use serde_json::{json, Number, Value};

mod common;

#[tokio::test]
async fn test_welcome_needs_no_key() {
    let app = common::spawn_app().await;

    let res = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Welcome to the Product API!"));

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_list_defaults_over_seed_data() {
    let app = common::spawn_app().await;

    let res = app.get("/products").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: ProductPage = res.json().await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 5);
    let ids: Vec<_> = page.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_pagination_second_item() {
    let app = common::spawn_app().await;

    let page: ProductPage = app
        .get("/products?page=2&limit=1")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 1);
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].name, "Smartphone");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_repeated_query_keys_keep_first_value() {
    let app = common::spawn_app().await;

    let res = app
        .get("/products?page=1&page=2&limit=1&category=kitchen&category=electronics")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page: ProductPage = res.json().await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 1);
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Coffee Maker");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_large_limit_is_not_capped() {
    let mut config = common::test_config();
    config.seed.enabled = false;
    let app = common::spawn_app_with(config).await;

    let store = app.server.store();
    for i in 0..150 {
        store.create(NewProduct {
            name: format!("Item {}", i),
            description: None,
            price: Number::from(1u64),
            category: None,
            in_stock: None,
        });
    }

    let res = app.get("/products?limit=150").send().await.unwrap();
    let page: ProductPage = res.json().await.unwrap();
    assert_eq!(page.total, 150);
    assert_eq!(page.limit, 150);
    assert_eq!(page.products.len(), 150);
    assert_eq!(page.products[149].name, "Item 149");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_category_filter() {
    let app = common::spawn_app().await;

    let page: ProductPage = app
        .get("/products?category=kitchen")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Coffee Maker");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = common::spawn_app().await;

    let page: ProductPage = app
        .get("/products?search=LAP")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].name, "Laptop");

    let page: ProductPage = app
        .get("/products?search=nothing-matches")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.products.is_empty());

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_stats_on_seed_data() {
    let app = common::spawn_app().await;

    let res = app.get("/products/stats").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let stats: Value = res.json().await.unwrap();
    assert_eq!(stats, json!({ "electronics": 2, "kitchen": 1 }));

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_stats_route_not_shadowed_by_id_route() {
    let app = common::spawn_app().await;

    let created: Product = app
        .post("/products")
        .json(&json!({ "name": "Gauge", "price": 5, "category": "tools" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let stats: HashMap<String, usize> = app
        .get("/products/stats")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["tools"], 1);

    let res = app.get(&format!("/products/{}", created.id)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_get_by_id() {
    let app = common::spawn_app().await;

    let res = app.get("/products/3").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "id": "3",
            "name": "Coffee Maker",
            "description": "Programmable coffee maker with timer",
            "price": 50,
            "category": "kitchen",
            "inStock": false
        })
    );

    let res = app.get("/products/404").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: ErrorBody = res.json().await.unwrap();
    assert_eq!(err.error, "Product not found");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_create_then_read_back() {
    let app = common::spawn_app().await;

    let submitted = json!({
        "name": "Standing Desk",
        "description": "Electric, two motors",
        "price": 499.99,
        "category": "office",
        "inStock": true
    });
    let res = app.post("/products").json(&submitted).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(!["1", "2", "3"].contains(&id.as_str()));

    let mut expected = submitted.clone();
    expected["id"] = Value::from(id.clone());
    assert_eq!(created, expected);

    let fetched: Value = app
        .get(&format!("/products/{}", id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, expected);
    assert_eq!(app.product_count(), 4);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_create_omits_unspecified_optionals() {
    let app = common::spawn_app().await;

    let created: Value = app
        .post("/products")
        .json(&json!({ "name": "Mug", "price": 8 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let fields = created.as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields["name"], "Mug");
    assert_eq!(fields["price"], 8);
    assert!(fields.contains_key("id"));

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = common::spawn_app().await;

    let mut ids = Vec::new();
    for i in 0..10 {
        let created: Product = app
            .post("/products")
            .json(&json!({ "name": format!("Item {}", i), "price": i }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        ids.push(created.id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_create_without_price_is_rejected_and_not_stored() {
    let app = common::spawn_app().await;

    let res = app
        .post("/products")
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: ErrorBody = res.json().await.unwrap();
    assert_eq!(err.error, "Invalid or missing product price");

    let page: ProductPage = app.get("/products").send().await.unwrap().json().await.unwrap();
    assert_eq!(page.total, 3);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_create_with_bad_name_is_rejected() {
    let app = common::spawn_app().await;

    let bodies = [
        json!({ "price": 10 }),
        json!({ "name": "", "price": 10 }),
        json!({ "name": 5, "price": 10 }),
    ];
    for body in bodies {
        let res = app.post("/products").json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: ErrorBody = res.json().await.unwrap();
        assert_eq!(err.error, "Invalid or missing product name");
    }
    assert_eq!(app.product_count(), 3);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_malformed_json_is_a_400() {
    let app = common::spawn_app().await;

    let res = app
        .post("/products")
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: ErrorBody = res.json().await.unwrap();
    assert!(err.error.starts_with("Invalid JSON body"));
    assert_eq!(app.product_count(), 3);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_update_zero_price_is_ignored_but_false_stock_applies() {
    let app = common::spawn_app().await;

    let res = app
        .put("/products/1")
        .json(&json!({ "name": "Laptop", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Product = res.json().await.unwrap();
    assert_eq!(updated.price.as_i64(), Some(1200));
    assert_eq!(updated.in_stock, Some(true));

    let updated: Product = app
        .put("/products/1")
        .json(&json!({ "name": "Laptop", "price": 0, "inStock": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.in_stock, Some(false));
    assert_eq!(updated.price.as_i64(), Some(1200));

    let fetched: Product = app.get("/products/1").send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched, updated);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_update_overwrites_truthy_fields() {
    let app = common::spawn_app().await;

    let updated: Product = app
        .put("/products/2")
        .json(&json!({
            "name": "Smartphone Pro",
            "price": 999,
            "description": "",
            "category": "phones"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(updated.id, "2");
    assert_eq!(updated.name, "Smartphone Pro");
    assert_eq!(updated.price.as_i64(), Some(999));
    assert_eq!(updated.description.as_deref(), Some("Latest model with 128GB storage"));
    assert_eq!(updated.category.as_deref(), Some("phones"));
    assert_eq!(updated.in_stock, Some(true));

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_update_null_stock_clears_flag() {
    let app = common::spawn_app().await;

    let res = app
        .put("/products/1")
        .json(&json!({ "name": "Laptop", "price": 1200, "inStock": null }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("inStock").is_none());

    let stored = app.server.store().find_by_id("1").unwrap();
    assert_eq!(stored.in_stock, None);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = common::spawn_app().await;

    let res = app
        .put("/products/missing")
        .json(&json!({ "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .put("/products/missing")
        .json(&json!({ "name": "X", "price": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: ErrorBody = res.json().await.unwrap();
    assert_eq!(err.error, "Product not found");

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_delete_lifecycle() {
    let app = common::spawn_app().await;

    let res = app.delete("/products/does-not-exist").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.delete("/products/2").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await.unwrap().is_empty());

    let res = app.get("/products/2").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.delete("/products/2").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let page: ProductPage = app.get("/products").send().await.unwrap().json().await.unwrap();
    let ids: Vec<_> = page.products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_unseeded_store_starts_empty() {
    let mut config = common::test_config();
    config.seed.enabled = false;
    let app = common::spawn_app_with(config).await;

    let page: ProductPage = app.get("/products").send().await.unwrap().json().await.unwrap();
    assert_eq!(page.total, 0);

    let stats: Value = app.get("/products/stats").send().await.unwrap().json().await.unwrap();
    assert_eq!(stats, json!({}));

    app.server.stop().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_creates_all_land() {
    let app = common::spawn_app().await;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let request = app
            .post("/products")
            .json(&json!({ "name": format!("Bulk {}", i), "price": 1 }));
        tasks.push(tokio::spawn(async move { request.send().await }));
    }
    for task in tasks {
        let res = task.await.unwrap().unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    assert_eq!(app.product_count(), 23);

    app.server.stop().await.unwrap();
}
