//! Wire types for the DummyJSON REST API.

use serde::{Deserialize, Serialize};

use storekeep_core::UserProfile;

/// Body for `POST /auth/login`.
///
/// No `Debug` on purpose: the password must never reach a log line.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful login payload: the user profile plus bearer tokens.
///
/// Implements `Debug` manually to redact the tokens.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("user", &self.user)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Error body shape used across the API: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Body for `POST /products/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body for `PUT /products/{id}`. Absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parses_dummyjson_payload() {
        let json = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://cdn.example.com/emily.png",
            "accessToken": "header.payload.signature",
            "refreshToken": "another.jwt.value"
        }"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.user.username, "emilys");
        assert_eq!(response.access_token, "header.payload.signature");
    }

    #[test]
    fn test_login_response_debug_redacts_tokens() {
        let response = LoginResponse {
            user: serde_json::from_str(
                r#"{"id":1,"username":"emilys","email":"e@x","firstName":"Emily","lastName":"Johnson"}"#,
            )
            .unwrap(),
            access_token: "very-secret-token".to_string(),
            refresh_token: "also-secret".to_string(),
        };

        let debug_output = format!("{response:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("very-secret-token"));
        assert!(!debug_output.contains("also-secret"));
    }

    #[test]
    fn test_product_patch_serializes_only_present_fields() {
        let patch = ProductPatch {
            price: Some(19.99),
            ..ProductPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();

        assert_eq!(json, r#"{"price":19.99}"#);
    }

    #[test]
    fn test_api_message_parses_error_body() {
        let body: ApiMessage = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.message, "Invalid credentials");
    }
}
