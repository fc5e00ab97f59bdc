use crate::server::model::booking::{parse_scheduled_time, BookingStatus};

mod can_transition_to;
mod parse;
