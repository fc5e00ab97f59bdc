use std::collections::HashMap;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
};


/// Builds a lookup closure over a fixed set of variables.
fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

const REQUIRED: [(&str, &str); 3] = [
    ("DATABASE_URL", "sqlite::memory:"),
    ("JWT_SECRET", "secret"),
    ("APP_URL", "http://localhost:3000/"),
];
