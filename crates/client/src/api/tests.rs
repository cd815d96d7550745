use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Jakarta;
use pasok_core::domain::{Period, Role, Supplier, Transaction, TransactionStatus, User};
use pasok_core::reports::ReportFilter;
use pasok_core::validation::{GoodsInput, LoginInput, SupplierInput};
use pasok_shared::AppConfig;
use pasok_shared::types::{KitchenId, PeriodId, SupplierId, UserId};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::ListQuery;
use crate::bulk::upload_goods;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::fetcher::TransactionFetcher;
use crate::session::StoredSession;

fn client_for(server: &MockServer, dir: &TempDir) -> ApiClient {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.session.dir = dir.path().to_path_buf();
    ApiClient::new(&config).unwrap()
}

fn logged_in(client: &ApiClient, token: &str) {
    client
        .session()
        .save(&StoredSession {
            token: token.to_string(),
            user: User {
                id: UserId(1),
                username: "admin".to_string(),
                name: None,
                email: None,
                role: Role::Admin,
                is_active: true,
            },
            saved_at: Utc::now(),
        })
        .unwrap();
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn page(data: Value, page: u32, total: u64, total_pages: u32) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": data,
        "pagination": { "page": page, "limit": 100, "total": total, "total_pages": total_pages }
    }))
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers/7"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ok(json!({ "id": 7, "name": "UD Sumber Rejeki" })))
        .expect(1)
        .mount(&server)
        .await;

    let supplier: Supplier = client.fetch(SupplierId(7)).await.unwrap();
    assert_eq!(supplier.name, "UD Sumber Rejeki");
    assert!(supplier.is_active);
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "expired");

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Token kedaluwarsa" })),
        )
        .mount(&server)
        .await;

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Token kedaluwarsa"));
    assert!(client.session().load().unwrap().is_none());
}

#[tokio::test]
async fn test_error_status_carries_extracted_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("DELETE"))
        .and(path("/api/v1/suppliers/3"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "errors": [{ "msg": "Supplier masih dipakai barang" }]
        })))
        .mount(&server)
        .await;

    let err = client.remove::<Supplier>(SupplierId(3)).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 409, ref message } if message == "Supplier masih dipakai barang"
    ));
    // only a 401 touches the session
    assert!(client.session().load().unwrap().is_some());
}

#[tokio::test]
async fn test_envelope_rejection() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/periods/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Belum ada periode aktif"
        })))
        .mount(&server)
        .await;

    let err = client.active_period().await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Belum ada periode aktif"));
}

#[tokio::test]
async fn test_list_all_walks_pages() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .and(query_param("page", "1"))
        .and(query_param("search", "ud"))
        .respond_with(page(json!([{ "id": 1, "name": "UD A" }]), 1, 2, 2))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .and(query_param("page", "2"))
        .respond_with(page(json!([{ "id": 2, "name": "UD B" }]), 2, 2, 2))
        .expect(1)
        .mount(&server)
        .await;

    let suppliers: Vec<Supplier> = client
        .list_all(&ListQuery::default().search("ud"))
        .await
        .unwrap();
    let names: Vec<_> = suppliers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["UD A", "UD B"]);
}

#[tokio::test]
async fn test_list_all_stops_when_server_repeats_first_page() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .respond_with(page(json!([{ "id": 1, "name": "UD A" }]), 1, 3, 3))
        .expect(3)
        .mount(&server)
        .await;

    let suppliers: Vec<Supplier> = client.list_all(&ListQuery::default()).await.unwrap();
    assert_eq!(suppliers.len(), 3);
}

#[tokio::test]
async fn test_invalid_input_is_not_sent() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let input = SupplierInput {
        code: None,
        name: "   ".to_string(),
        owner: None,
        address: None,
        phone: None,
        is_active: true,
    };
    let err = client.create::<Supplier>(&input).await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
}

#[tokio::test]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_partial_json(json!({ "username": "operator" })))
        .respond_with(ok(json!({
            "token": "t-123",
            "user": { "id": 4, "username": "operator", "role": "operator" }
        })))
        .mount(&server)
        .await;

    let session = client
        .login(&LoginInput {
            username: "operator".to_string(),
            password: "rahasia".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.user.role, Role::Operator);
    assert_eq!(client.session().token().unwrap().as_deref(), Some("t-123"));
}

#[tokio::test]
async fn test_logout_clears_even_when_server_fails() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    client.logout().await.unwrap();
    assert!(client.session().load().unwrap().is_none());
}

#[tokio::test]
async fn test_closed_period_is_not_closed_again() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    let period: Period = serde_json::from_value(json!({
        "id": 2,
        "name": "Desember 2025",
        "start_date": "2025-12-01",
        "end_date": "2025-12-31",
        "is_closed": true
    }))
    .unwrap();
    let err = client.close_period(&period).await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
}

#[tokio::test]
async fn test_kiosk_flow() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("POST"))
        .and(path("/api/v1/kitchen-access/verify"))
        .and(body_partial_json(json!({ "code": "DPR01" })))
        .respond_with(ok(json!({ "id": 5, "name": "Dapur Utama" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/kitchen-access/DPR01/goods"))
        .respond_with(ok(json!([{ "id": 1, "name": "Beras", "sale_price": "12000" }])))
        .mount(&server)
        .await;

    let session = client.open_kiosk(" DPR01 ").await.unwrap();
    assert_eq!(session.kitchen.id, KitchenId(5));

    let goods = client.kiosk_goods(None).await.unwrap();
    assert_eq!(goods.len(), 1);
    assert_eq!(goods[0].sale_price, dec!(12000));

    client.close_kiosk().unwrap();
    let err = client.kiosk_goods(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
}

#[tokio::test]
async fn test_fetcher_keeps_completed_transactions_with_items() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("GET"))
        .and(path("/api/v1/kitchens/1"))
        .respond_with(ok(json!({ "id": 1, "name": "Dapur Utama" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/periods/9"))
        .respond_with(ok(json!({
            "id": 9, "name": "Januari 2026",
            "start_date": "2026-01-01", "end_date": "2026-01-31"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions"))
        .and(query_param("status", "completed"))
        .and(query_param("kitchen_id", "1"))
        .respond_with(page(
            json!([
                { "id": 11, "code": "TRX-1", "date": "2026-01-05", "kitchen_id": 1, "period_id": 9, "status": "completed" },
                { "id": 12, "code": "TRX-2", "date": "2026-01-05", "kitchen_id": 1, "period_id": 9, "status": "completed" }
            ]),
            1,
            2,
            1,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/11"))
        .respond_with(ok(json!({
            "id": 11, "code": "TRX-1", "date": "2026-01-05T02:00:00Z", "kitchen_id": 1,
            "period_id": 9, "status": "completed",
            "items": [{ "goods_id": 1, "supplier_id": 1, "quantity": "2", "sale_price": "1000", "cost_price": "800" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/12"))
        .respond_with(ok(json!({
            "id": 12, "code": "TRX-2", "date": "2026-01-05", "kitchen_id": 1,
            "period_id": 9, "status": "cancelled", "items": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/goods"))
        .respond_with(page(json!([{ "id": 1, "name": "Beras", "supplier_id": 1 }]), 1, 1, 1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .respond_with(page(json!([{ "id": 1, "name": "UD A" }]), 1, 1, 1))
        .mount(&server)
        .await;

    let filter = ReportFilter {
        kitchen_id: KitchenId(1),
        period_id: PeriodId(9),
        date: None,
    };
    let input = TransactionFetcher::new(&client, Jakarta).fetch(&filter).await.unwrap();
    assert_eq!(input.kitchen.name, "Dapur Utama");
    let codes: Vec<&Transaction> = input.transactions.iter().collect();
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].status, TransactionStatus::Completed);
    assert_eq!(codes[0].items.len(), 1);
    assert_eq!(input.goods.len(), 1);
    assert_eq!(input.suppliers.len(), 1);
}

#[tokio::test]
async fn test_fetcher_drops_transactions_outside_filter() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("GET"))
        .and(path("/api/v1/kitchens/1"))
        .respond_with(ok(json!({ "id": 1, "name": "Dapur Utama" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/periods/9"))
        .respond_with(ok(json!({
            "id": 9, "name": "Januari 2026",
            "start_date": "2026-01-01", "end_date": "2026-01-31"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/transactions"))
        .and(query_param("date", "2026-01-05"))
        .respond_with(page(
            json!([
                { "id": 11, "code": "TRX-1", "date": "2026-01-07", "kitchen_id": 1, "period_id": 8, "status": "completed" },
                { "id": 12, "code": "TRX-2", "date": "2026-01-05", "kitchen_id": 1, "period_id": 8, "status": "completed" },
                { "id": 13, "code": "TRX-3", "date": "2026-01-04T20:00:00Z", "kitchen_id": 1, "period_id": 9, "status": "completed" }
            ]),
            1,
            3,
            1,
        ))
        .mount(&server)
        .await;
    for (id, date, period) in [(11, "2026-01-07", 8), (12, "2026-01-05", 8), (13, "2026-01-04T20:00:00Z", 9)] {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/transactions/{id}")))
            .respond_with(ok(json!({
                "id": id, "code": format!("TRX-{}", id - 10), "date": date, "kitchen_id": 1,
                "period_id": period, "status": "completed",
                "items": [{ "goods_id": 1, "supplier_id": 1, "quantity": "1", "sale_price": "1000", "cost_price": "800" }]
            })))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/api/v1/goods"))
        .respond_with(page(json!([]), 1, 0, 1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/suppliers"))
        .respond_with(page(json!([]), 1, 0, 1))
        .mount(&server)
        .await;

    let filter = ReportFilter {
        kitchen_id: KitchenId(1),
        period_id: PeriodId(9),
        date: NaiveDate::from_ymd_opt(2026, 1, 5),
    };
    let input = TransactionFetcher::new(&client, Jakarta).fetch(&filter).await.unwrap();
    let codes: Vec<&str> = input.transactions.iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, ["TRX-3"]);
}

#[tokio::test]
async fn test_fetcher_rejects_date_outside_period() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);

    Mock::given(method("GET"))
        .and(path("/api/v1/kitchens/1"))
        .respond_with(ok(json!({ "id": 1, "name": "Dapur Utama" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/periods/9"))
        .respond_with(ok(json!({
            "id": 9, "name": "Januari 2026",
            "start_date": "2026-01-01", "end_date": "2026-01-31"
        })))
        .mount(&server)
        .await;

    let filter = ReportFilter {
        kitchen_id: KitchenId(1),
        period_id: PeriodId(9),
        date: NaiveDate::from_ymd_opt(2026, 2, 1),
    };
    let err = TransactionFetcher::new(&client, Jakarta).fetch(&filter).await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(pasok_shared::AppError::Validation(_))));
}

#[tokio::test]
async fn test_bulk_upload_counts_failures() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, &dir);
    logged_in(&client, "abc");

    Mock::given(method("POST"))
        .and(path("/api/v1/goods"))
        .and(body_partial_json(json!({ "name": "Beras" })))
        .respond_with(ok(json!({ "id": 1, "name": "Beras" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/goods"))
        .and(body_partial_json(json!({ "name": "Gula" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Kode sudah dipakai" })),
        )
        .mount(&server)
        .await;

    let row = |name: &str, price| GoodsInput {
        code: None,
        name: name.to_string(),
        unit: "kg".to_string(),
        sale_price: price,
        cost_price: dec!(100),
        supplier_id: None,
        is_active: true,
    };
    let rows = vec![row("Beras", dec!(12000)), row("Gula", dec!(15000)), row("Minyak", dec!(-1))];

    let summary = upload_goods(&client, &rows).await.unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.failures[0].row, 2);
    assert_eq!(summary.failures[0].reason, "Kode sudah dipakai");
    assert_eq!(summary.failures[1].label, "Minyak");
}
