use serde::Serialize;

use super::error::SheetsError;
use crate::shared::config::SheetsConfig;

/// HTTP-клиент для Google Sheets (API v4 и опубликованные выгрузки)
pub struct SheetsClient {
    client: reqwest::Client,
    config: SheetsConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: Vec<Vec<&'a str>>,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    fn access_token(&self) -> Option<&str> {
        self.config
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Either credential is enough for the typed API
    pub fn has_credentials(&self) -> bool {
        self.access_token().is_some() || self.has_api_key()
    }

    /// Bearer token when configured, otherwise `?key=`
    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, SheetsError> {
        if let Some(token) = self.access_token() {
            Ok(request.bearer_auth(token))
        } else if let Some(key) = self.api_key() {
            Ok(request.query(&[("key", key)]))
        } else {
            Err(SheetsError::MissingApiKey)
        }
    }

    /// `Lager!A:Z`
    pub fn tab_range(&self) -> String {
        format!("{}!{}", self.config.tab, self.config.range)
    }

    /// `Lager!J7`
    pub fn cell_range(&self, column: &str, row_number: u32) -> String {
        format!("{}!{}{}", self.config.tab, column, row_number)
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    pub fn gviz_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/gviz/tq?tqx=out:json&gid={}",
            self.config.docs_base_url.trim_end_matches('/'),
            self.config.spreadsheet_id,
            self.config.gid
        )
    }

    pub fn csv_export_url(&self) -> String {
        format!(
            "{}/spreadsheets/d/{}/export?format=csv&gid={}",
            self.config.docs_base_url.trim_end_matches('/'),
            self.config.spreadsheet_id,
            self.config.gid
        )
    }

    /// GET values/{tab}!{range} through the typed API, needs a key or token
    pub async fn get_values(&self) -> Result<String, SheetsError> {
        let url = self.values_url(&self.tab_range());
        let request = self.authorize(self.client.get(&url))?;
        tracing::debug!("Sheets API v4 GET {}", url);

        let response = request.send().await?;
        Self::read_body(response).await
    }

    /// GET on one of the published endpoints
    pub async fn get_published(&self, url: &str) -> Result<String, SheetsError> {
        tracing::debug!("Sheets published GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_body(response).await
    }

    /// PUT a single cell via values.update
    pub async fn update_cell(&self, range: &str, value: &str) -> Result<(), SheetsError> {
        let url = self.values_url(range);
        let body = ValueRange {
            range,
            major_dimension: "ROWS",
            values: vec![vec![value]],
        };

        let request = self.authorize(
            self.client
                .put(&url)
                .query(&[("valueInputOption", "USER_ENTERED")])
                .json(&body),
        )?;

        tracing::info!("Sheets API v4 PUT {} = {:?}", range, value);
        let response = request.send().await?;
        Self::read_body(response).await.map(|_| ())
    }

    async fn read_body(response: reqwest::Response) -> Result<String, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            return Err(SheetsError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "sheet-1".to_string(),
            gid: "42".to_string(),
            tab: "Lager".to_string(),
            range: "A:Z".to_string(),
            api_key: Some("  ".to_string()),
            access_token: None,
            reservation_column: None,
            reservation_days: 14,
            request_timeout_seconds: 5,
            api_base_url: "https://sheets.googleapis.com/v4/".to_string(),
            docs_base_url: "https://docs.google.com".to_string(),
        }
    }

    #[test]
    fn test_urls() {
        let client = SheetsClient::new(config());
        assert_eq!(
            client.values_url(&client.tab_range()),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Lager%21A%3AZ"
        );
        assert_eq!(
            client.gviz_url(),
            "https://docs.google.com/spreadsheets/d/sheet-1/gviz/tq?tqx=out:json&gid=42"
        );
        assert_eq!(
            client.csv_export_url(),
            "https://docs.google.com/spreadsheets/d/sheet-1/export?format=csv&gid=42"
        );
        assert_eq!(client.cell_range("J", 7), "Lager!J7");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let client = SheetsClient::new(config());
        assert!(!client.has_api_key());
    }

    #[test]
    fn test_access_token_alone_is_enough() {
        let mut config = config();
        config.access_token = Some("ya29.token".to_string());
        let client = SheetsClient::new(config);
        assert!(!client.has_api_key());
        assert!(client.has_credentials());
        assert!(client.authorize(client.client.get("http://localhost")).is_ok());
    }

    #[tokio::test]
    async fn test_update_without_credentials_fails_fast() {
        let client = SheetsClient::new(config());
        assert!(!client.has_credentials());
        let err = client.update_cell("Lager!J7", "x").await.unwrap_err();
        assert!(matches!(err, SheetsError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_get_values_without_key_fails_fast() {
        let client = SheetsClient::new(config());
        let err = client.get_values().await.unwrap_err();
        assert!(matches!(err, SheetsError::MissingApiKey));
    }
}
