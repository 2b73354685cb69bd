use crate::config::IdentityConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

/// Client for the external identity provider. Every request's bearer
/// token is forwarded to the provider's `/user` endpoint; a 2xx response
/// carries the identity behind the token.
#[derive(Clone)]
pub struct IdentityService {
    http: Client,
    cfg: IdentityConfig,
}

impl IdentityService {
    pub fn new(cfg: IdentityConfig) -> Self {
        let http = Client::builder()
            .user_agent("pointpool-backend/identity")
            .build()
            .expect("reqwest client");
        Self { http, cfg }
    }

    pub async fn verify_token(&self, token: &str) -> AppResult<IdentityUser> {
        if token.is_empty() {
            return Err(AppError::AuthError("Missing access token".into()));
        }

        let url = format!("{}/user", self.cfg.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalApiError(format!("Identity provider unreachable: {e}"))
            })?;

        if !resp.status().is_success() {
            return Err(AppError::AuthError("Invalid access token".into()));
        }

        let user: IdentityUser = resp
            .json()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Invalid identity response: {e}")))?;

        Ok(user)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl IdentityUser {
    /// Display name falls back to the local part of the email address.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.user_metadata.name
            && !name.is_empty()
        {
            return name.clone();
        }
        self.email
            .split('@')
            .next()
            .unwrap_or(self.email.as_str())
            .to_string()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.app_metadata.roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity_payload() {
        let raw = r#"{
            "id": "8a1cdbbd-96b4-4f32-9f65-6f2a86b3f2f1",
            "email": "alice@example.com",
            "user_metadata": { "name": "Alice" },
            "app_metadata": { "roles": ["admin"] }
        }"#;
        let user: IdentityUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.display_name(), "Alice");
        assert!(user.has_role("admin"));
        assert!(!user.has_role("editor"));
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let raw = r#"{
            "id": "8a1cdbbd-96b4-4f32-9f65-6f2a86b3f2f1",
            "email": "bob@example.com"
        }"#;
        let user: IdentityUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.display_name(), "bob");
        assert!(user.app_metadata.roles.is_empty());
    }
}
