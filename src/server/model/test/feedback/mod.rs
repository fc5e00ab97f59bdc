use chrono::Utc;

use crate::server::model::feedback::{
    validate_ratings, CategoryRatings, Feedback, FeedbackStatus, RatingSummary,
};

mod rating_summary;
mod validate_ratings;

fn feedback(rating: i32, categories: CategoryRatings) -> Feedback {
    Feedback {
        id: 1,
        booking_id: 1,
        house_owner_id: 1,
        technician_id: Some(2),
        service_id: 1,
        rating,
        categories,
        comment: None,
        is_auto_generated: false,
        status: FeedbackStatus::Published,
        admin_response: None,
        created_at: Utc::now(),
    }
}
