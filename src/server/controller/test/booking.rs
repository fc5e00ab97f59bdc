use super::*;

use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, inventory_item::InventoryItemFactory},
};

use crate::server::{model::user::Role, service::token::TokenService};

fn token_for(id: i32, role: Role) -> String {
    TokenService::new(TEST_SECRET, 1).issue(id, role).unwrap()
}

/// Tests creating a booking over HTTP with inventory.
///
/// Expected: 201 with the booking pending, inventory reserved and the total
/// including the item line
#[tokio::test]
async fn owner_creates_booking_with_inventory() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await.unwrap();
    let service = factory::service_offering::ServiceOfferingFactory::new(db)
        .price(80.0)
        .build()
        .await
        .unwrap();
    let item = InventoryItemFactory::new(db)
        .quantity(5)
        .unit_price(10.0)
        .build()
        .await
        .unwrap();

    let date = (Utc::now() + Duration::days(3)).date_naive();
    let (status, body) = send(
        app(db).await,
        Method::POST,
        "/api/bookings",
        Some(&token_for(owner.id, Role::HouseOwner)),
        Some(json!({
            "service_id": service.id,
            "scheduled_date": date.to_string(),
            "scheduled_time": "09:00",
            "address": "12 Elm Street",
            "selected_inventory": [{ "item_id": item.id, "quantity": 2 }],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["inventory_status"], "reserved");
    assert_eq!(body["total_amount"], 100.0);
}

/// Tests that technicians cannot create bookings.
///
/// Expected: 403 Forbidden
#[tokio::test]
async fn technician_cannot_create_booking() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let technician = factory::create_technician(db).await.unwrap();
    let service = factory::create_service(db).await.unwrap();

    let date = (Utc::now() + Duration::days(3)).date_naive();
    let (status, _) = send(
        app(db).await,
        Method::POST,
        "/api/bookings",
        Some(&token_for(technician.id, Role::Technician)),
        Some(json!({
            "service_id": service.id,
            "scheduled_date": date.to_string(),
            "scheduled_time": "09:00",
            "address": "12 Elm Street",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

/// Tests that booking statistics are admin only.
///
/// Expected: 403 for a house owner, 200 for an admin
#[tokio::test]
async fn stats_require_admin() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await.unwrap();
    let admin = factory::create_admin(db).await.unwrap();
    let app = app(db).await;

    let (owner_status, _) = send(
        app.clone(),
        Method::GET,
        "/api/bookings/stats",
        Some(&token_for(owner.id, Role::HouseOwner)),
        None,
    )
    .await;
    let (admin_status, body) = send(
        app,
        Method::GET,
        "/api/bookings/stats",
        Some(&token_for(admin.id, Role::Admin)),
        None,
    )
    .await;

    assert_eq!(owner_status, StatusCode::FORBIDDEN);
    assert_eq!(admin_status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

/// Tests an unknown status filter on the booking list.
///
/// Expected: 400 Bad Request
#[tokio::test]
async fn list_rejects_unknown_status_filter() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_house_owner(db).await.unwrap();

    let (status, _) = send(
        app(db).await,
        Method::GET,
        "/api/bookings?status=finished",
        Some(&token_for(owner.id, Role::HouseOwner)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Tests that an illegal transition is rejected over HTTP.
///
/// Expected: 400 when an admin tries to complete a pending booking
#[tokio::test]
async fn status_update_rejects_illegal_transition() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await.unwrap();
    let (_, _, _, booking) = factory::helpers::create_booking_with_dependencies(db)
        .await
        .unwrap();

    let (status, _) = send(
        app(db).await,
        Method::PUT,
        &format!("/api/bookings/{}/status", booking.id),
        Some(&token_for(admin.id, Role::Admin)),
        Some(json!({ "status": "completed" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Tests the payment webhook without a configured secret.
///
/// Expected: 503 Service Unavailable
#[tokio::test]
async fn webhook_unavailable_without_secret() {
    let test = TestBuilder::new().with_booking_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (status, _) = send(
        app(db).await,
        Method::POST,
        "/api/payments/webhook",
        None,
        Some(json!({ "type": "payment_intent.succeeded" })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
