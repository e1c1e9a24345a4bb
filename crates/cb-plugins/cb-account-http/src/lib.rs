//! # cb-account-http
//!
//! HTTP implementation of `AccountService` against the external account
//! backend (a small JSON-over-POST API, `http://localhost:5000` by default).
//!
//! The wire contract is narrow: a success payload on 2xx, or
//! `{"error": "<message>"}` with a non-2xx status. The status code picks the
//! error variant; the server's message is carried through verbatim so the
//! caller can show it. No retry and no backoff — a failed call is reported
//! once and abandoned.

use async_trait::async_trait;
use cb_core::error::{AppError, Result};
use cb_core::models::NewAccount;
use cb_core::traits::AccountService;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

pub struct HttpAccountClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

#[derive(Deserialize)]
struct BalanceBody {
    balance: f64,
}

#[derive(Deserialize)]
struct NewBalanceBody {
    new_balance: f64,
}

#[derive(Deserialize)]
struct SignInBody {
    pseudo: String,
}

#[derive(Deserialize)]
struct ExistsBody {
    exists: bool,
}

fn status_to_error(status: StatusCode, message: String) -> AppError {
    let message = if message.is_empty() {
        format!("account service returned {status}")
    } else {
        message
    };
    match status {
        StatusCode::BAD_REQUEST => AppError::ValidationError(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
        StatusCode::NOT_FOUND => AppError::NotFound("account".into(), message),
        _ => AppError::Remote(message),
    }
}

impl HttpAccountClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Remote(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::Remote(e.to_string()))
        } else {
            let error = response.json::<ErrorBody>().await.unwrap_or_default().error;
            tracing::warn!(%url, %status, error, "account service request rejected");
            Err(status_to_error(status, error))
        }
    }
}

impl Default for HttpAccountClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl AccountService for HttpAccountClient {
    async fn sign_up(&self, email: &str, password: &str, pseudo: &str) -> Result<NewAccount> {
        self.post(
            "/signup",
            json!({ "email": email, "password": password, "pseudo": pseudo }),
        )
        .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String> {
        let body: SignInBody = self
            .post("/signin", json!({ "email": email, "password": password }))
            .await?;
        Ok(body.pseudo)
    }

    async fn balance(&self, email: &str) -> Result<f64> {
        let body: BalanceBody = self.post("/balance", json!({ "email": email })).await?;
        Ok(body.balance)
    }

    async fn deposit(&self, email: &str, amount: f64) -> Result<f64> {
        let body: NewBalanceBody = self
            .post("/deposit", json!({ "email": email, "amount": amount }))
            .await?;
        Ok(body.new_balance)
    }

    async fn withdraw(&self, email: &str, amount: f64) -> Result<f64> {
        let body: NewBalanceBody = self
            .post("/withdraw", json!({ "email": email, "amount": amount }))
            .await?;
        Ok(body.new_balance)
    }

    async fn transfer(&self, email: &str, to_iban: &str, amount: f64) -> Result<f64> {
        let body: NewBalanceBody = self
            .post(
                "/transfer",
                json!({ "email": email, "to_iban": to_iban, "amount": amount }),
            )
            .await?;
        Ok(body.new_balance)
    }

    async fn buy(&self, email: &str, asset_id: &str, amount: f64) -> Result<f64> {
        let body: NewBalanceBody = self
            .post(
                "/buy",
                json!({ "email": email, "crypto": asset_id, "amount": amount }),
            )
            .await?;
        Ok(body.new_balance)
    }

    async fn sell(&self, email: &str, asset_id: &str, amount: f64) -> Result<f64> {
        let body: NewBalanceBody = self
            .post(
                "/sell",
                json!({ "email": email, "crypto": asset_id, "amount": amount }),
            )
            .await?;
        Ok(body.new_balance)
    }

    async fn account_exists(&self, iban: &str) -> Result<bool> {
        let body: ExistsBody = self.post("/verify-iban", json!({ "iban": iban })).await?;
        Ok(body.exists)
    }
}
