use chrono::{Duration, NaiveTime, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, inventory_item::InventoryItemFactory, user::UserFactory},
};

use crate::server::{
    data::{
        booking::BookingRepository, feedback::FeedbackRepository, inventory::InventoryRepository,
        notification::NotificationRepository,
    },
    error::AppError,
    model::{
        booking::{BookingStatus, CreateBookingParams, InventoryStatus},
        inventory::StockRequest,
    },
    service::{booking::BookingService, realtime::RealtimeHub, test::domain_user},
};

mod assign;
mod cancel;
mod create;
mod reminder;
mod update_status;

fn booking_params(house_owner_id: i32, service_id: i32, items: Vec<StockRequest>) -> CreateBookingParams {
    CreateBookingParams {
        house_owner_id,
        service_id,
        scheduled_date: (Utc::now() + Duration::days(2)).date_naive(),
        scheduled_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        address: "12 Elm Street".to_string(),
        notes: None,
        items,
    }
}

async fn stock_of(db: &sea_orm::DatabaseConnection, item_id: i32) -> i32 {
    InventoryRepository::new(db)
        .find_by_id(item_id)
        .await
        .unwrap()
        .unwrap()
        .quantity
}
