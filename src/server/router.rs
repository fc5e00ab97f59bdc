use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        announcement::{
            create_announcement, delete_announcement, get_all_announcements, get_announcements,
            mark_announcement_read, update_announcement,
        },
        auth::{
            change_password, forgot_password, google_callback, google_login, login, me, register,
            resend_verification, reset_password, verify_email,
        },
        booking::{
            assign_technician, cancel_booking, create_booking, get_booking, get_booking_stats,
            get_bookings, update_booking_status,
        },
        feedback::{
            create_feedback, get_booking_feedback, get_feedback, get_technician_feedback,
            respond_to_feedback, update_feedback_status,
        },
        inventory::{
            create_item, delete_item, get_item, get_items, get_low_stock, restock_item,
            update_item,
        },
        notification::{
            delete_notification, get_notifications, get_unread_count,
            mark_all_notifications_read, mark_notification_read,
        },
        payment::{confirm_payment, create_payment_intent, payment_webhook},
        service_offering::{
            create_service, delete_service, get_categories, get_service, get_services,
            update_service,
        },
        user::{
            add_address, delete_address, get_technicians, get_user, get_users, update_profile,
            update_user_role, update_user_status,
        },
        ws::socket,
    },
    doc::ApiDoc,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/verify-email", post(verify_email))
        .route("/api/auth/resend-verification", post(resend_verification))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/auth/change-password", put(change_password))
        .route("/api/auth/google", get(google_login))
        .route("/api/auth/google/callback", get(google_callback))
        // Users
        .route("/api/users", get(get_users))
        .route("/api/users/technicians", get(get_technicians))
        .route("/api/users/profile", put(update_profile))
        .route("/api/users/addresses", post(add_address))
        .route("/api/users/addresses/{address_id}", delete(delete_address))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/status", put(update_user_status))
        .route("/api/users/{id}/role", put(update_user_role))
        // Services
        .route("/api/services", get(get_services).post(create_service))
        .route("/api/services/categories", get(get_categories))
        .route(
            "/api/services/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
        // Bookings
        .route("/api/bookings", get(get_bookings).post(create_booking))
        .route("/api/bookings/stats", get(get_booking_stats))
        .route("/api/bookings/{id}", get(get_booking))
        .route("/api/bookings/{id}/assign", put(assign_technician))
        .route("/api/bookings/{id}/status", put(update_booking_status))
        .route("/api/bookings/{id}/cancel", put(cancel_booking))
        // Inventory
        .route("/api/inventory", get(get_items).post(create_item))
        .route("/api/inventory/low-stock", get(get_low_stock))
        .route(
            "/api/inventory/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/api/inventory/{id}/restock", put(restock_item))
        // Feedback
        .route("/api/feedback", get(get_feedback).post(create_feedback))
        .route("/api/feedback/technician/{id}", get(get_technician_feedback))
        .route("/api/feedback/booking/{booking_id}", get(get_booking_feedback))
        .route("/api/feedback/{id}/respond", put(respond_to_feedback))
        .route("/api/feedback/{id}/status", put(update_feedback_status))
        // Notifications
        .route("/api/notifications", get(get_notifications))
        .route("/api/notifications/unread-count", get(get_unread_count))
        .route("/api/notifications/read-all", put(mark_all_notifications_read))
        .route("/api/notifications/{id}", delete(delete_notification))
        .route("/api/notifications/{id}/read", put(mark_notification_read))
        // Announcements
        .route(
            "/api/announcements",
            get(get_announcements).post(create_announcement),
        )
        .route("/api/announcements/all", get(get_all_announcements))
        .route(
            "/api/announcements/{id}",
            put(update_announcement).delete(delete_announcement),
        )
        .route("/api/announcements/{id}/read", put(mark_announcement_read))
        // Payments
        .route("/api/payments/create-intent", post(create_payment_intent))
        .route("/api/payments/confirm", post(confirm_payment))
        .route("/api/payments/webhook", post(payment_webhook))
        // Real-time
        .route("/api/ws", get(socket))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
