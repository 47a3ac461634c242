use anyhow::{anyhow, Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin PostgREST client for the Supabase project configured in [`AppConfig`].
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.anon_key).context("Invalid Supabase anon key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Without a user token PostgREST runs the request under the anon role.
        let bearer = auth_token.unwrap_or(&self.anon_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer))
                .context("Invalid bearer token")?,
        );

        Ok(headers)
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers(auth_token)?;
        if method == Method::POST {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                409 => anyhow!("Conflict: {}", error_text),
                _ => anyhow!("API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Runs a filtered `GET /rest/v1/<table>` and returns every matching row.
    pub async fn select<T>(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let query = filters
            .iter()
            .map(|(column, filter)| format!("{}={}", column, urlencoding::encode(filter)))
            .collect::<Vec<_>>()
            .join("&");

        let path = if query.is_empty() {
            format!("/rest/v1/{}", table)
        } else {
            format!("/rest/v1/{}?{}", table, query)
        };

        self.request::<Vec<T>, ()>(Method::GET, &path, None, None).await
    }

    /// Inserts one row and returns the stored representation.
    pub async fn insert<T, B>(&self, table: &str, row: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let path = format!("/rest/v1/{}", table);
        let mut rows: Vec<T> = self.request(Method::POST, &path, None, Some(row)).await?;

        if rows.is_empty() {
            return Err(anyhow!("Insert into {} returned no rows", table));
        }

        Ok(rows.swap_remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(url: &str) -> AppConfig {
        AppConfig {
            supabase_url: url.to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            supabase_jwt_secret: "test-secret".to_string(),
            redis_url: None,
            business_utc_offset_minutes: 0,
        }
    }

    #[tokio::test]
    async fn test_select_sends_filters_and_anon_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/things"))
            .and(query_param("owner", "eq.P1"))
            .and(header("apikey", "test-anon-key"))
            .and(header("authorization", "Bearer test-anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&test_config(&mock_server.uri()));
        let rows: Vec<Value> = client
            .select("things", &[("owner", "eq.P1".to_string())])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_requests_representation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/things"))
            .and(header("prefer", "return=representation"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{ "id": 7 }])))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&test_config(&mock_server.uri()));
        let row: Value = client.insert("things", &json!({ "name": "x" })).await.unwrap();

        assert_eq!(row["id"], 7);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/things"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let client = SupabaseClient::new(&test_config(&mock_server.uri()));
        let result: Result<Vec<Value>> = client.select("things", &[]).await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("500"));
        assert!(err.contains("boom"));
    }
}
