use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use carkg_frontend::backend::{HttpBackend, SearchBackend};
use carkg_frontend::config::Settings;
use carkg_frontend::error::TransportError;
use carkg_frontend::filters::FilterState;
use carkg_frontend::models::{EnergyType, QueryRequest, ResultItem, VehicleType};

type Seen = Arc<Mutex<Vec<Value>>>;

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service()).await.unwrap();
    });
    addr
}

// Mock backend answering every query with a fixed status and body
async fn mock_backend(status: StatusCode, body: Value) -> (SocketAddr, Seen) {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/api/query",
            post(move |State(seen): State<Seen>, Json(request): Json<Value>| {
                let body = body.clone();
                async move {
                    seen.lock().unwrap().push(request);
                    (status, Json(body))
                }
            }),
        )
        .with_state(seen.clone());
    (serve(router).await, seen)
}

fn backend_for(addr: SocketAddr) -> HttpBackend {
    HttpBackend::with_client(reqwest::Client::new(), format!("http://{addr}/api/query"))
}

fn request(query: &str) -> QueryRequest {
    let mut filters = FilterState::default();
    filters.set_price_range(10, 30);
    filters.set_vehicle_types([VehicleType::Sedan, VehicleType::Suv]);
    filters.set_energy_types([EnergyType::Hybrid]);
    QueryRequest {
        query: query.to_string(),
        filters: filters.apply(),
        page: 2,
        page_size: 10,
    }
}

#[tokio::test]
async fn posts_request_body_and_decodes_results() {
    let (addr, seen) = mock_backend(
        StatusCode::OK,
        json!({
            "success": true,
            "page": 1,
            "results": [
                { "name": "RAV4荣放", "brand": "丰田", "rating": 4.43 },
                { "name": "天籁" }
            ]
        }),
    )
    .await;

    let response = backend_for(addr).search(&request("20万预算的SUV")).await.unwrap();

    assert!(response.success);
    assert_eq!(response.page, Some(1));
    let results = response.results.unwrap();
    assert_eq!(results[0].brand.as_deref(), Some("丰田"));
    assert_eq!(results[1], ResultItem::named("天籁"));

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[json!({
            "query": "20万预算的SUV",
            "filters": {
                "price_min": 10,
                "price_max": 30,
                "vehicle_types": ["suv", "sedan"],
                "energy_types": ["hybrid"]
            },
            "page": 2,
            "page_size": 10
        })]
    );
}

#[tokio::test]
async fn application_failure_is_a_normal_response() {
    let (addr, _seen) = mock_backend(StatusCode::OK, json!({ "success": false, "error": "no match" })).await;

    let response = backend_for(addr).search(&request("MPV")).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("no match"));
}

#[tokio::test]
async fn body_without_success_flag_keeps_backend_message() {
    let (addr, _seen) = mock_backend(StatusCode::OK, json!({ "error": "no match" })).await;

    let response = backend_for(addr).search(&request("MPV")).await.unwrap();

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("no match"));
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let (addr, _seen) = mock_backend(StatusCode::SERVICE_UNAVAILABLE, json!({ "success": true })).await;

    let outcome = backend_for(addr).search(&request("MPV")).await;

    assert_eq!(outcome, Err(TransportError::Status(503)));
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    // an item without a name can't be shown at all
    let (addr, _seen) = mock_backend(
        StatusCode::OK,
        json!({ "success": true, "results": [{ "brand": "丰田" }] }),
    )
    .await;

    let outcome = backend_for(addr).search(&request("SUV")).await;

    match outcome {
        // the serde cause is kept, not just reqwest's summary
        Err(TransportError::Decode(detail)) => assert!(detail.contains("name"), "{detail}"),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = backend_for(addr).search(&request("SUV")).await;

    match outcome {
        Err(TransportError::Request(detail)) => assert!(detail.contains(": "), "{detail}"),
        other => panic!("expected a request error, got {other:?}"),
    }
}

#[tokio::test]
async fn settings_build_the_query_endpoint() {
    let (addr, seen) = mock_backend(StatusCode::OK, json!({ "success": true })).await;
    let settings = Settings {
        server_address: "127.0.0.1:0".to_string(),
        backend_url: format!("http://{addr}/api/"),
        proxy_url: None,
    };

    let backend = HttpBackend::new(&settings).unwrap();
    assert_eq!(backend.endpoint(), format!("http://{addr}/api/query"));

    backend.search(&request("SUV")).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}
