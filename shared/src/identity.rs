use crate::Role;
use serde::{Deserialize, Serialize};

/// `identifier` is either the e-mail address or the username.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub role: String,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_response_decodes_with_unknown_role() {
        let res: LoginResponse = serde_json::from_value(json!({
            "token": "t",
            "user": {
                "id": "u1", "firstname": "Ana", "lastname": "Ilić",
                "username": "ana", "email": "ana@uni.rs",
                "is_active": true, "role": "superuser"
            }
        }))
        .unwrap();
        assert_eq!(res.user.role(), None);
        assert_eq!(res.user.full_name(), "Ana Ilić");
    }
}
