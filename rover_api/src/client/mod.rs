pub mod config;
mod client;

pub use client::{expect_success, parse_json_if_ok, RoverClient};
pub use config::ClientConfig;

pub use crate::{
    api::{api_key::ApiKeyApi, lookup::LookupApi, update::UpdateApi},
    error::{ApiError, RoverError},
};
