use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::notification::NotificationRepository,
    model::notification::{CreateNotificationParams, NotificationKind},
};

mod delete;
mod mark_read;

fn announcement(recipient_id: i32) -> CreateNotificationParams {
    CreateNotificationParams::new(
        recipient_id,
        NotificationKind::Announcement,
        "Maintenance",
        "Scheduled downtime tonight",
    )
}
