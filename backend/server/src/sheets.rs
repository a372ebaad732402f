//! Google Sheets values API client.
//!
//! The store surface is two operations, append-row and list-rows, behind
//! the [`SheetStore`] trait. The production implementation authenticates
//! per operation: a service-account JWT (RS256) is exchanged for a bearer
//! token, so credential changes take effect without a restart.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const API_BASE_URL: &str = "https://sheets.googleapis.com";
const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Service-account credential pair.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub client_email: String,
    pub private_key: String,
}

/// Everything one sheet operation needs, resolved per request.
#[derive(Clone, Debug)]
pub struct SheetTarget {
    pub spreadsheet_id: String,
    pub sheet_title: String,
    pub credentials: Credentials,
}

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("invalid service account key: {0}")]
    Key(#[from] jsonwebtoken::errors::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api base url rejected path segments")]
    BaseUrl,

    #[error("upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
}

/// Append-row and list-rows against the backing sheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    async fn append_row(
        &self,
        target: &SheetTarget,
        cells: Vec<String>,
    ) -> Result<(), SheetError>;

    async fn list_rows(&self, target: &SheetTarget) -> Result<Vec<Vec<String>>, SheetError>;
}

pub struct GoogleSheets {
    http: Client,
    token_url: Url,
    api_base: Url,
}

impl GoogleSheets {
    pub fn new() -> Self {
        Self::with_base_urls(TOKEN_URL, API_BASE_URL)
    }

    /// Base URLs are injectable so tests can point the client at a local
    /// server. Both must be http(s) URLs.
    pub fn with_base_urls(token_url: &str, api_base: &str) -> Self {
        Self {
            http: Client::builder()
                .connect_timeout(Duration::from_secs(15))
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap(),
            token_url: Url::parse(token_url).unwrap(),
            api_base: Url::parse(api_base).unwrap(),
        }
    }

    async fn access_token(&self, credentials: &Credentials) -> Result<String, SheetError> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let assertion = mint_jwt(credentials, self.token_url.as_str(), now)?;

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let response = check_status(response).await?;
        let token: TokenResponse = response.json().await?;

        Ok(token.access_token)
    }

    fn values_url(&self, target: &SheetTarget, append: bool) -> Result<Url, SheetError> {
        let tail = if append {
            format!("{}:append", target.sheet_title)
        } else {
            target.sheet_title.clone()
        };

        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| SheetError::BaseUrl)?
            .extend([
                "v4",
                "spreadsheets",
                target.spreadsheet_id.as_str(),
                "values",
                tail.as_str(),
            ]);

        if append {
            url.query_pairs_mut()
                .append_pair("valueInputOption", "USER_ENTERED");
        }

        Ok(url)
    }
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn append_row(
        &self,
        target: &SheetTarget,
        cells: Vec<String>,
    ) -> Result<(), SheetError> {
        let token = self.access_token(&target.credentials).await?;
        let url = self.values_url(target, true)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&ValueRange { values: vec![cells] })
            .send()
            .await?;

        check_status(response).await?;

        Ok(())
    }

    async fn list_rows(&self, target: &SheetTarget) -> Result<Vec<Vec<String>>, SheetError> {
        let token = self.access_token(&target.credentials).await?;
        let url = self.values_url(target, false)?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;

        let range: ValueRange = response.json().await?;

        Ok(range.values)
    }
}

/// Body shape of the values API in both directions. The API omits
/// `values` entirely for an empty range.
#[derive(Serialize, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

fn mint_jwt(credentials: &Credentials, audience: &str, now: u64) -> Result<String, SheetError> {
    #[derive(Serialize)]
    struct Claims {
        iss: String,
        scope: String,
        aud: String,
        iat: u64,
        exp: u64,
    }

    let claims = Claims {
        iss: credentials.client_email.clone(),
        scope: SCOPE.to_string(),
        aud: audience.to_string(),
        iat: now.saturating_sub(60),
        exp: now + 3600,
    };

    let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())?;

    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &key,
    )?)
}

async fn check_status(response: Response) -> Result<Response, SheetError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(SheetError::Upstream { status, body })
}

#[cfg(test)]
mod tests {
    use super::{Credentials, GoogleSheets, SheetError, SheetTarget, ValueRange, mint_jwt};

    fn target() -> SheetTarget {
        SheetTarget {
            spreadsheet_id: "sheet-id".to_string(),
            sheet_title: "Round 1".to_string(),
            credentials: Credentials {
                client_email: "svc@example.iam.gserviceaccount.com".to_string(),
                private_key: "not a pem".to_string(),
            },
        }
    }

    #[test]
    fn test_mint_jwt_rejects_invalid_pem() {
        let credentials = target().credentials;
        let result = mint_jwt(&credentials, "https://oauth2.googleapis.com/token", 1_700_000_000);

        assert!(matches!(result, Err(SheetError::Key(_))));
    }

    #[test]
    fn test_append_url_encodes_title_and_input_option() {
        let sheets = GoogleSheets::new();

        let url = sheets.values_url(&target(), true).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/Round%201:append?valueInputOption=USER_ENTERED"
        );
    }

    #[test]
    fn test_list_url_has_no_query() {
        let sheets = GoogleSheets::new();

        let url = sheets.values_url(&target(), false).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/Round%201"
        );
    }

    #[test]
    fn test_value_range_defaults_when_values_omitted() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "Round 1!A1:H1"}"#).unwrap();

        assert!(range.values.is_empty());
    }
}
