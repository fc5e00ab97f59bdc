use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{data::address::AddressRepository, model::user::CreateAddressParams};

mod create;
mod delete;

fn address(label: &str, is_default: bool) -> CreateAddressParams {
    CreateAddressParams {
        label: label.to_string(),
        street: "1 Main Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        is_default,
    }
}
