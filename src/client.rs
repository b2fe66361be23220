//! Employee API HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{EmployeeRecord, FormDraft};

const USER_AGENT: &str = concat!("employee-directory/", env!("CARGO_PKG_VERSION"));

/// Server acknowledgement of a created employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEmployee {
    /// Identifier returned as `Hiring_TestID`.
    pub confirmation_id: String,
}

#[derive(Debug, Deserialize)]
struct ActivationResponse {
    #[serde(rename = "activationCode")]
    activation_code: Option<String>,
}

#[derive(Serialize)]
struct ListRequest<'a> {
    #[serde(rename = "activationCode")]
    activation_code: &'a str,
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    #[serde(flatten)]
    draft: &'a FormDraft,
    #[serde(rename = "activationCode")]
    activation_code: &'a str,
}

/// Employee API client.
///
/// Every operation first obtains a short-lived activation code and then uses
/// it for the substantive call. Codes are never cached or shared between
/// calls; a failure in either leg fails the whole operation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::with_base_url(&config.base_url, config.timeout_secs)
    }

    /// Create a client against an explicit base URL (e.g. a mock server).
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{base}/{endpoint}", base = self.base_url)
    }

    /// POST to an endpoint and return the body of a success response.
    async fn post(&self, endpoint: &str, body: Option<&impl Serialize>) -> Result<String> {
        let mut request = self.client.post(self.url(endpoint));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(format!("{endpoint} returned {status}")));
        }

        Ok(response.text().await?)
    }

    /// Obtain a fresh activation code.
    async fn activation_code(&self) -> Result<String> {
        let body = self.post("get_activation_code", None::<&()>).await?;
        let parsed: ActivationResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::fetch(format!("invalid activation code response: {e}")))?;

        parsed
            .activation_code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AppError::fetch("response did not contain an activation code"))
    }

    /// Fetch every employee record.
    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>> {
        let result = self.fetch_employees().await;
        match &result {
            Ok(records) => info!("Fetched {} employees", records.len()),
            Err(e) => error!("Error fetching employees: {}", e),
        }
        result
    }

    async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>> {
        let code = self.activation_code().await?;
        let body = self
            .post("get_all_employee", Some(&ListRequest { activation_code: &code }))
            .await?;

        serde_json::from_str::<Vec<EmployeeRecord>>(&body)
            .map_err(|e| AppError::fetch(format!("invalid employee list: {e}")))
    }

    /// Create an employee from a validated draft.
    ///
    /// Success requires a `Hiring_TestID` in the response; any other body is
    /// [`AppError::SubmissionRejected`] even when the status was 2xx.
    pub async fn create_employee(&self, draft: &FormDraft) -> Result<CreatedEmployee> {
        let result = self.submit_employee(draft).await;
        match &result {
            Ok(created) => info!("Employee created with id {}", created.confirmation_id),
            Err(e) => error!("Error adding employee: {}", e),
        }
        result
    }

    async fn submit_employee(&self, draft: &FormDraft) -> Result<CreatedEmployee> {
        let code = self.activation_code().await?;
        let request = CreateRequest {
            draft,
            activation_code: &code,
        };
        let body = self.post("add_employee", Some(&request)).await?;
        debug!("add_employee response: {}", body);

        confirmation_id(&body).ok_or(AppError::SubmissionRejected)
    }
}

/// Extract the confirmation id from a create response body.
fn confirmation_id(body: &str) -> Option<CreatedEmployee> {
    let value: Value = serde_json::from_str(body).ok()?;
    let id = match value.get("Hiring_TestID")? {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(CreatedEmployee { confirmation_id: id })
}
