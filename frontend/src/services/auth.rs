use gloo::net::http::Request;
use serde::{Deserialize, Serialize};
use shared::{CertificateUser, StoreError};

use crate::config::AppConfig;

/// An authenticated session held in memory for the lifetime of the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: CertificateUser,
}

#[derive(Serialize)]
struct PasswordSignIn<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the backend's password sign-in and sign-out endpoints
#[derive(Clone, PartialEq)]
pub struct AuthClient {
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let request = Request::post(&url)
            .header("apikey", &self.anon_key)
            .json(&PasswordSignIn { email, password })
            .map_err(|e| StoreError::Decode(format!("Failed to serialize request: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        match response.status() {
            200..=299 => response
                .json::<Session>()
                .await
                .map_err(|e| StoreError::Decode(e.to_string())),
            400 | 401 => Err(StoreError::Unauthorized),
            status => Err(StoreError::Http {
                status,
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            }),
        }
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), StoreError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = Request::post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(StoreError::Http {
                status: response.status(),
                message: response.status_text(),
            })
        }
    }
}
