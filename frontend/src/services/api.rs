use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use js_sys::Uint8Array;
use serde::Serialize;
use shared::store::storage_key_from_public_url;
use shared::{Certificate, CertificateInsert, CertificateStore, StoreError, StoredFile};
use url::Url;

use crate::config::AppConfig;

/// API client for the backend-as-a-service row and object storage endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    anon_key: String,
    bucket: String,
    table: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.anon_key.clone(),
            bucket: config.storage_bucket.clone(),
            table: config.table.clone(),
            access_token: None,
        }
    }

    /// Client that acts on behalf of a signed-in user
    pub fn with_access_token(mut self, access_token: String) -> Self {
        self.access_token = Some(access_token);
        self
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &format!("Bearer {}", bearer))
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn rest_url(&self, params: &[(&str, String)]) -> Result<String, StoreError> {
        let base = self.table_url();
        Url::parse_with_params(&base, params)
            .map(String::from)
            .map_err(|e| StoreError::Network(format!("Invalid URL {}: {}", base, e)))
    }

    pub fn list_url(&self, user_id: &str) -> Result<String, StoreError> {
        self.rest_url(&[
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("order", "created_at.desc".to_string()),
        ])
    }

    pub fn delete_url(&self, id: &str) -> Result<String, StoreError> {
        self.rest_url(&[("id", format!("eq.{}", id))])
    }

    pub fn object_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key)
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, key)
    }
}

/// Map a non-2xx response to an error carrying the backend's message
async fn check(response: Response) -> Result<Response, StoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    match status {
        401 | 403 => Err(StoreError::Unauthorized),
        404 => Err(StoreError::NotFound(message)),
        _ => Err(StoreError::Http { status, message }),
    }
}

fn network(e: gloo::net::Error) -> StoreError {
    StoreError::Network(e.to_string())
}

#[derive(Serialize)]
struct RemoveObjects<'a> {
    prefixes: [&'a str; 1],
}

#[async_trait(?Send)]
impl CertificateStore for ApiClient {
    async fn list_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, StoreError> {
        let url = self.list_url(user_id)?;
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(network)?;
        check(response)
            .await?
            .json::<Vec<Certificate>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert_certificate(&self, row: &CertificateInsert) -> Result<Certificate, StoreError> {
        let url = self.table_url();
        let request = self
            .authorize(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(&[row])
            .map_err(|e| StoreError::Decode(format!("Failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(network)?;
        let mut rows = check(response)
            .await?
            .json::<Vec<Certificate>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Decode("Insert returned no rows".to_string()));
        }
        Ok(rows.remove(0))
    }

    async fn delete_certificate(&self, id: &str) -> Result<(), StoreError> {
        let url = self.delete_url(id)?;
        let response = self
            .authorize(Request::delete(&url))
            .send()
            .await
            .map_err(network)?;
        check(response).await.map(|_| ())
    }

    async fn upload_file(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StoreError> {
        let body = Uint8Array::from(bytes.as_slice());
        let request = self
            .authorize(Request::post(&self.object_url(key)))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(body)
            .map_err(network)?;
        let response = request.send().await.map_err(network)?;
        check(response).await?;
        Ok(StoredFile {
            key: key.to_string(),
            public_url: self.public_url(key),
        })
    }

    async fn delete_file(&self, key: &str) -> Result<(), StoreError> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);
        let request = self
            .authorize(Request::delete(&url))
            .json(&RemoveObjects { prefixes: [key] })
            .map_err(|e| StoreError::Decode(format!("Failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(network)?;
        check(response).await.map(|_| ())
    }

    fn storage_key_for(&self, public_url: &str) -> Option<String> {
        storage_key_from_public_url(public_url, &self.bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn client() -> ApiClient {
        ApiClient::new(&AppConfig {
            supabase_url: "https://abc.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            storage_bucket: "certificates".to_string(),
            table: "certificates".to_string(),
            log_level: log::LevelFilter::Info,
        })
    }

    #[wasm_bindgen_test]
    fn list_url_scopes_to_user_newest_first() {
        let url = client().list_url("user-1").unwrap();
        assert_eq!(
            url,
            "https://abc.supabase.co/rest/v1/certificates?select=*&user_id=eq.user-1&order=created_at.desc"
        );
    }

    #[wasm_bindgen_test]
    fn public_url_round_trips_to_storage_key() {
        let client = client();
        let url = client.public_url("user-1/1704067200000.pdf");
        assert_eq!(client.storage_key_for(&url).as_deref(), Some("user-1/1704067200000.pdf"));
    }
}
