use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;
use trinity_os::nutrition::{nutrition_router, NutritionSearchService, ReqwestFoodDataClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upstream_body() -> Value {
    json!({
        "totalHits": 2,
        "foods": [
            {
                "fdcId": 1750340,
                "description": "Apples, fuji, with skin, raw",
                "dataType": "Foundation",
                "foodNutrients": [
                    { "nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 63.0 },
                    { "nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 0.15 },
                    { "nutrientId": 1079, "nutrientName": "Fiber, total dietary", "unitName": "G", "value": 2.1 },
                    { "nutrientId": 1162, "nutrientName": "Vitamin C", "unitName": "MG", "value": 4.6 },
                    { "nutrientId": 1253, "nutrientName": "Cholesterol", "unitName": "MG", "value": 0.0 }
                ]
            },
            {
                "fdcId": 171688,
                "description": "Apples, raw, with skin",
                "dataType": "SR Legacy",
                "foodNutrients": [
                    { "nutrientId": 1092, "nutrientName": "Potassium, K", "unitName": "MG", "value": 107.0 },
                    { "nutrientId": 1178, "nutrientName": "Vitamin B-12", "unitName": "UG" }
                ]
            }
        ]
    })
}

fn app(server: &MockServer) -> axum::Router {
    let client = ReqwestFoodDataClient::new(&server.uri(), SecretString::new("test-key".into()))
        .expect("client builds");
    nutrition_router(Arc::new(NutritionSearchService::new(Arc::new(client))))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn post(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/nutrition/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn valid_query_maps_nutrient_ids_to_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdc/v1/foods/search"))
        .and(query_param("query", "apple"))
        .and(query_param("pageSize", "5"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post(json!({ "query": "apple", "pageSize": 5 })))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalHits"], 2);
    assert_eq!(
        body["foods"][0],
        json!({
            "fdcId": 1750340,
            "description": "Apples, fuji, with skin, raw",
            "dataType": "Foundation",
            "nutrients": {
                "calories": 63.0,
                "protein": 0.15,
                "fiber": 2.1,
                "vitaminC": 4.6
            }
        })
    );
    assert_eq!(body["foods"][1]["nutrients"], json!({ "potassium": 107.0 }));
}

#[tokio::test]
async fn get_requests_use_the_default_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdc/v1/foods/search"))
        .and(query_param("query", "banana"))
        .and(query_param("pageSize", "25"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "foods": [], "totalHits": 0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/nutrition/search?query=banana")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "foods": [], "totalHits": 0 }));
}

#[tokio::test]
async fn empty_query_is_a_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_body()))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .clone()
        .oneshot(post(json!({ "query": "", "pageSize": 10 })))
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "query parameter is required");

    let response = app(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/nutrition/search")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request handled");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_is_an_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdc/v1/foods/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post(json!({ "query": "apple" })))
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error string");
    assert!(message.contains("503"));
    assert!(message.contains("down for maintenance"));
}
