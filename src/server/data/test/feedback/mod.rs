use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::helpers::create_booking_with_dependencies};

use crate::server::{
    data::feedback::FeedbackRepository,
    model::feedback::{CategoryRatings, CreateFeedbackParams, FeedbackStatus},
};

mod create;
mod get_published_by_technician;
mod replace_auto_generated;

fn params(
    booking: &entity::booking::Model,
    technician_id: i32,
    rating: i32,
    status: FeedbackStatus,
) -> CreateFeedbackParams {
    CreateFeedbackParams {
        booking_id: booking.id,
        house_owner_id: booking.house_owner_id,
        technician_id: Some(technician_id),
        service_id: booking.service_id,
        rating,
        categories: CategoryRatings::default(),
        comment: None,
        is_auto_generated: false,
        status,
    }
}
