use reqwest::StatusCode;
use serde_json::json;

use billbook_api::{app::build_app, context::AppContext};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, backed by the in-memory store, bound to an
        // ephemeral port.
        let ctx = AppContext::in_memory();
        let app = build_app(&ctx);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn receipt_body(receipt_no: &str, date: &str) -> serde_json::Value {
    json!({
        "receiptNo": receipt_no,
        "customerName": "Sharma Traders",
        "date": date,
        "address": "14 Mill Road",
        "items": [
            { "description": "Cutting", "quantity": 2, "rate": 50.0, "amount": 100.0 }
        ],
        "totalAmount": 100.0
    })
}

async fn create(client: &reqwest::Client, base_url: &str, body: &serde_json::Value) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/receipts", base_url))
        .json(body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_is_live() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let body = json!({
        "receiptNo": "42",
        "customerName": "Sharma Traders",
        "date": "2024-06-15",
        "items": [
            { "description": "Cutting", "quantity": 2, "rate": 50.0, "amount": 100.0 },
            { "description": "Folding", "quantity": 1, "chalNo": "CH-101", "rate": 25.0, "amount": 25.0 }
        ],
        "totalAmount": 125.0
    });
    let created = create(&client, &srv.base_url, &body).await;
    assert_eq!(created["success"], true);
    let data = &created["data"];
    let id = data["id"].as_str().unwrap().to_string();
    assert_eq!(data["receiptNo"], "42");
    assert_eq!(data["createdAt"], data["updatedAt"]);
    // No address in the payload: the field is omitted, not null.
    assert!(data.get("address").is_none());

    let res = client
        .get(format!("{}/api/receipts/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    let data = &fetched["data"];
    assert_eq!(data["receiptNo"], "42");
    assert_eq!(data["customerName"], "Sharma Traders");
    assert_eq!(data["date"], "2024-06-15");
    assert_eq!(data["totalAmount"], 125.0);
    // Item order is preserved.
    assert_eq!(data["items"][0]["description"], "Cutting");
    assert_eq!(data["items"][1]["description"], "Folding");
    assert_eq!(data["items"][1]["chalNo"], "CH-101");
}

#[tokio::test]
async fn duplicate_receipt_number_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv.base_url, &receipt_body("7", "2024-06-01")).await;

    let res = client
        .post(format!("{}/api/receipts", srv.base_url))
        .json(&receipt_body("7", "2024-06-02"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Receipt number must be unique");

    // Exactly one receipt with that number survives.
    let list: serde_json::Value = client
        .get(format!("{}/api/receipts", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let matching = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["receiptNo"] == "7")
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn validation_failure_is_a_400_with_the_uniform_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut body = receipt_body("1", "2024-06-01");
    body["customerName"] = json!("");
    let res = client
        .post(format!("{}/api/receipts", srv.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "customerName is required");
}

#[tokio::test]
async fn malformed_json_body_gets_the_uniform_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/receipts", srv.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_is_most_recently_created_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Transaction dates deliberately run against creation order: the list
    // sorts by creation time, not by date or receipt number.
    create(&client, &srv.base_url, &receipt_body("a", "2024-06-30")).await;
    create(&client, &srv.base_url, &receipt_body("b", "2024-06-15")).await;
    create(&client, &srv.base_url, &receipt_body("c", "2024-06-01")).await;

    let list: serde_json::Value = client
        .get(format!("{}/api/receipts", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["success"], true);
    let order: Vec<&str> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["receiptNo"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn date_range_filter_is_inclusive_and_needs_both_bounds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    create(&client, &srv.base_url, &receipt_body("1", "2024-06-15")).await;

    let june: serde_json::Value = client
        .get(format!(
            "{}/api/receipts?startDate=2024-06-01&endDate=2024-06-30",
            srv.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(june["data"].as_array().unwrap().len(), 1);

    let july: serde_json::Value = client
        .get(format!(
            "{}/api/receipts?startDate=2024-07-01&endDate=2024-07-31",
            srv.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(july["data"].as_array().unwrap().is_empty());

    // A lone bound does not filter.
    let lone: serde_json::Value = client
        .get(format!("{}/api/receipts?startDate=2024-07-01", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(lone["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_date_query_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/receipts?startDate=June&endDate=2024-06-30",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "startDate must be an ISO date (YYYY-MM-DD)");
}

#[tokio::test]
async fn missing_receipt_is_a_404_not_a_fault() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/receipts/0191b5a4-0000-7000-8000-000000000000",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Receipt not found");

    let res = client
        .get(format!("{}/api/receipts/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid receipt id");
}

#[tokio::test]
async fn next_number_starts_at_one_and_increments_numerically() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let suggestion: serde_json::Value = client
        .get(format!("{}/api/receipts/next-number", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(suggestion["data"]["nextNumber"], "1");

    // Numeric comparison: "10" beats "3" even though it sorts lower as a
    // string (the behavior this system deliberately fixes).
    create(&client, &srv.base_url, &receipt_body("3", "2024-06-01")).await;
    create(&client, &srv.base_url, &receipt_body("10", "2024-06-02")).await;
    create(&client, &srv.base_url, &receipt_body("2", "2024-06-03")).await;

    let suggestion: serde_json::Value = client
        .get(format!("{}/api/receipts/next-number", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(suggestion["data"]["nextNumber"], "11");
}

#[tokio::test]
async fn repeated_get_returns_identical_bytes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create(&client, &srv.base_url, &receipt_body("1", "2024-06-01")).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let url = format!("{}/api/receipts/{}", srv.base_url, id);

    let first = client.get(&url).send().await.unwrap().text().await.unwrap();
    let second = client.get(&url).send().await.unwrap().text().await.unwrap();
    assert_eq!(first, second);
}
