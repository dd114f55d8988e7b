use super::Gateway;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::request::HttpClient;
use campus_shared::protocol::GetUser;
use campus_shared::{LoginRequest, LoginResponse, RegisterRequest, User};

/// Identity service: registration, login, user lookup.
#[derive(Debug, Clone)]
pub struct IdentityApi<C> {
    gw: Gateway<C>,
}

impl<C: HttpClient> IdentityApi<C> {
    pub fn new(client: C, config: &ApiConfig, token: Option<String>) -> Self {
        Self {
            gw: Gateway::new(client, &config.identity_url, token),
        }
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<User> {
        self.gw.call("identity.register", req).await
    }

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.gw.call("identity.login", req).await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.gw
            .call("identity.get_user", &GetUser { id: id.to_string() })
            .await
    }
}
