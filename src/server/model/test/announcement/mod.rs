use chrono::{Duration, Utc};

use crate::server::model::{
    announcement::{Announcement, Audience, Priority},
    user::Role,
};

mod audience;
mod from_dto;
mod is_live;
