//! Gateways bound to the browser transport, the build-time config and the
//! current token.

use crate::auth::use_auth;
use crate::web::FetchClient;
use campus::ApiConfig;
use campus::api::{DiningApi, HousingApi, IdentityApi};
use leptos::prelude::*;

pub fn use_config() -> ApiConfig {
    use_context::<ApiConfig>().expect("ApiConfig should be provided")
}

pub fn use_identity() -> IdentityApi<FetchClient> {
    IdentityApi::new(FetchClient, &use_config(), use_auth().token())
}

pub fn use_dining() -> DiningApi<FetchClient> {
    DiningApi::new(FetchClient, &use_config(), use_auth().token())
}

pub fn use_housing() -> HousingApi<FetchClient> {
    HousingApi::new(FetchClient, &use_config(), use_auth().token())
}
