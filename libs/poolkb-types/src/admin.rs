use serde::{Deserialize, Serialize};

/// Admin account details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_super_admin: bool,

    /// When the account was created (ISO 8601 format)
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login payload.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub admin: AdminUser,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("admin", &self.admin)
            .finish()
    }
}

#[derive(Serialize)]
pub struct AdminCreate<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub is_super_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_debug_hides_token() {
        let response: LoginResponse = serde_json::from_value(json!({
            "access_token": "eyJsecret",
            "token_type": "bearer",
            "admin": {
                "id": 1,
                "username": "root",
                "email": "root@example.com",
                "is_active": true,
                "is_super_admin": true
            }
        }))
        .unwrap();

        let debug = format!("{:?}", response);
        assert!(!debug.contains("eyJsecret"));
        assert!(debug.contains("root@example.com"));
    }
}
