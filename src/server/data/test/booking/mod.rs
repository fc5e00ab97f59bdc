use chrono::{Duration, NaiveTime, Utc};
use sea_orm::DbErr;
use test_utils::{
    builder::TestBuilder,
    factory::{self, booking::BookingFactory, helpers::create_booking_with_dependencies},
};

use crate::server::{
    data::booking::{BookingRepository, NewBooking, NewBookingItem},
    model::booking::{BookingScope, BookingStatus, InventoryStatus, StatusChange},
};

mod apply_status_change;
mod create;
mod get_paginated;
mod mark_paid;
mod stats;
