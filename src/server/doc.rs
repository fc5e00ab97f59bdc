//! OpenAPI document for the REST API, served through Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{
    model::{
        announcement::{AnnouncementDto, CreateAnnouncementDto, UpdateAnnouncementDto},
        api::{ErrorDto, MessageDto},
        auth::{
            AuthResponseDto, ChangePasswordDto, ForgotPasswordDto, LoginDto, RegisterDto,
            ResetPasswordDto, VerifyEmailDto,
        },
        booking::{
            AssignTechnicianDto, BookingDto, BookingItemDto, BookingStatsDto, CancelBookingDto,
            CreateBookingDto, PaginatedBookingsDto, SelectedInventoryDto, UpdateBookingStatusDto,
        },
        feedback::{
            AdminResponseDto, CategoryRatingsDto, CreateFeedbackDto, FeedbackDto,
            PaginatedFeedbackDto, RatingSummaryDto, RespondFeedbackDto, TechnicianFeedbackDto,
            UpdateFeedbackStatusDto,
        },
        inventory::{CreateInventoryItemDto, InventoryItemDto, RestockDto, UpdateInventoryItemDto},
        notification::{NotificationDto, PaginatedNotificationsDto, UnreadCountDto},
        payment::{ConfirmPaymentDto, CreatePaymentIntentDto, PaymentIntentDto, PaymentStatusDto},
        service_offering::{
            CreateServiceOfferingDto, ServiceOfferingDto, UpdateServiceOfferingDto,
        },
        user::{
            AddressDto, CreateAddressDto, PaginatedUsersDto, UpdateProfileDto, UpdateUserRoleDto,
            UpdateUserStatusDto, UserDto,
        },
    },
    server::controller::{
        announcement, auth, booking, feedback, inventory, notification, payment,
        service_offering, user,
    },
};

/// Registers the bearer token scheme referenced by `security(("bearer" = []))`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Bearer);
        scheme.bearer_format = Some("JWT".to_string());
        components.add_security_scheme("bearer", SecurityScheme::Http(scheme));
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "ServiceHub API",
        description = "Home services marketplace: bookings, inventory, feedback and notifications."
    ),
    paths(
        auth::register,
        auth::login,
        auth::me,
        auth::verify_email,
        auth::resend_verification,
        auth::forgot_password,
        auth::reset_password,
        auth::change_password,
        auth::google_login,
        auth::google_callback,
        user::get_users,
        user::get_technicians,
        user::get_user,
        user::update_profile,
        user::update_user_status,
        user::update_user_role,
        user::add_address,
        user::delete_address,
        service_offering::get_services,
        service_offering::get_categories,
        service_offering::get_service,
        service_offering::create_service,
        service_offering::update_service,
        service_offering::delete_service,
        booking::create_booking,
        booking::get_bookings,
        booking::get_booking_stats,
        booking::get_booking,
        booking::assign_technician,
        booking::update_booking_status,
        booking::cancel_booking,
        inventory::get_items,
        inventory::get_low_stock,
        inventory::get_item,
        inventory::create_item,
        inventory::update_item,
        inventory::restock_item,
        inventory::delete_item,
        feedback::create_feedback,
        feedback::get_feedback,
        feedback::get_technician_feedback,
        feedback::get_booking_feedback,
        feedback::respond_to_feedback,
        feedback::update_feedback_status,
        notification::get_notifications,
        notification::get_unread_count,
        notification::mark_notification_read,
        notification::mark_all_notifications_read,
        notification::delete_notification,
        announcement::get_announcements,
        announcement::get_all_announcements,
        announcement::create_announcement,
        announcement::update_announcement,
        announcement::delete_announcement,
        announcement::mark_announcement_read,
        payment::create_payment_intent,
        payment::confirm_payment,
        payment::payment_webhook,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        RegisterDto,
        LoginDto,
        AuthResponseDto,
        VerifyEmailDto,
        ForgotPasswordDto,
        ResetPasswordDto,
        ChangePasswordDto,
        UserDto,
        AddressDto,
        PaginatedUsersDto,
        UpdateProfileDto,
        UpdateUserStatusDto,
        UpdateUserRoleDto,
        CreateAddressDto,
        ServiceOfferingDto,
        CreateServiceOfferingDto,
        UpdateServiceOfferingDto,
        BookingDto,
        BookingItemDto,
        SelectedInventoryDto,
        PaginatedBookingsDto,
        CreateBookingDto,
        AssignTechnicianDto,
        UpdateBookingStatusDto,
        CancelBookingDto,
        BookingStatsDto,
        InventoryItemDto,
        CreateInventoryItemDto,
        UpdateInventoryItemDto,
        RestockDto,
        FeedbackDto,
        CategoryRatingsDto,
        AdminResponseDto,
        PaginatedFeedbackDto,
        CreateFeedbackDto,
        RespondFeedbackDto,
        UpdateFeedbackStatusDto,
        RatingSummaryDto,
        TechnicianFeedbackDto,
        NotificationDto,
        PaginatedNotificationsDto,
        UnreadCountDto,
        AnnouncementDto,
        CreateAnnouncementDto,
        UpdateAnnouncementDto,
        CreatePaymentIntentDto,
        PaymentIntentDto,
        ConfirmPaymentDto,
        PaymentStatusDto,
    )),
    tags(
        (name = "auth", description = "Registration, sign-in and account recovery"),
        (name = "user", description = "Accounts, profiles and addresses"),
        (name = "service", description = "Bookable service catalogue"),
        (name = "booking", description = "Booking lifecycle"),
        (name = "inventory", description = "Stock items used by bookings"),
        (name = "feedback", description = "Ratings and moderation"),
        (name = "notification", description = "Per-user notifications"),
        (name = "announcement", description = "Broadcast announcements"),
        (name = "payment", description = "Payment intents and gateway webhooks")
    )
)]
pub struct ApiDoc;
