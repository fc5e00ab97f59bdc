use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::{
    model::notification::{NotificationDto, PaginatedNotificationsDto},
    server::{
        error::AppError,
        model::{parse_stored, UnknownVariant},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    BookingCreated,
    BookingAssigned,
    BookingStatusChanged,
    BookingCancelled,
    BookingReminder,
    PaymentReceived,
    FeedbackReceived,
    FeedbackResponse,
    LowStock,
    Announcement,
}

impl NotificationKind {
    const ALL: [NotificationKind; 10] = [
        NotificationKind::BookingCreated,
        NotificationKind::BookingAssigned,
        NotificationKind::BookingStatusChanged,
        NotificationKind::BookingCancelled,
        NotificationKind::BookingReminder,
        NotificationKind::PaymentReceived,
        NotificationKind::FeedbackReceived,
        NotificationKind::FeedbackResponse,
        NotificationKind::LowStock,
        NotificationKind::Announcement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "booking_created",
            NotificationKind::BookingAssigned => "booking_assigned",
            NotificationKind::BookingStatusChanged => "booking_status_changed",
            NotificationKind::BookingCancelled => "booking_cancelled",
            NotificationKind::BookingReminder => "booking_reminder",
            NotificationKind::PaymentReceived => "payment_received",
            NotificationKind::FeedbackReceived => "feedback_received",
            NotificationKind::FeedbackResponse => "feedback_response",
            NotificationKind::LowStock => "low_stock",
            NotificationKind::Announcement => "announcement",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "notification kind",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i32,
    pub recipient_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub booking_id: Option<i32>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            recipient_id: entity.recipient_id,
            kind: parse_stored("notification kind", &entity.kind)?,
            title: entity.title,
            message: entity.message,
            booking_id: entity.booking_id,
            is_read: entity.is_read,
            read_at: entity.read_at,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            kind: self.kind.as_str().to_string(),
            title: self.title,
            message: self.message,
            booking_id: self.booking_id,
            is_read: self.is_read,
            read_at: self.read_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedNotifications {
    pub notifications: Vec<Notification>,
    pub unread: u64,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedNotifications {
    pub fn into_dto(self) -> PaginatedNotificationsDto {
        PaginatedNotificationsDto {
            notifications: self
                .notifications
                .into_iter()
                .map(Notification::into_dto)
                .collect(),
            unread: self.unread,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationParams {
    pub recipient_id: i32,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub booking_id: Option<i32>,
}

impl CreateNotificationParams {
    pub fn new(
        recipient_id: i32,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            kind,
            title: title.into(),
            message: message.into(),
            booking_id: None,
        }
    }

    pub fn for_booking(mut self, booking_id: i32) -> Self {
        self.booking_id = Some(booking_id);
        self
    }
}
