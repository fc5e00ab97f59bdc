use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::announcement::AnnouncementRepository,
    model::announcement::{Audience, CreateAnnouncementParams, Priority},
};

mod get_active_for_audiences;
mod mark_read;

fn params(title: &str, audience: Audience, created_by: i32) -> CreateAnnouncementParams {
    CreateAnnouncementParams {
        title: title.to_string(),
        content: "Details".to_string(),
        audience,
        priority: Priority::Normal,
        starts_at: None,
        ends_at: None,
        created_by,
    }
}
