use crate::{
    config::Config,
    error::{ApiError, Result},
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

const TASK_POLL_INTERVAL: Duration = Duration::from_millis(500);
const TASK_POLL_ATTEMPTS: usize = 240;

/// Thin request/response client for the hosted platform API.
///
/// Every long-running operation returns a [`TaskEnvelope`]; callers follow
/// each request with [`SteamshipClient::wait`], which polls the task until
/// the platform reports completion. Retry behavior beyond that polling loop
/// is deliberately absent.
#[derive(Debug, Clone)]
pub struct SteamshipClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct TaskEnvelope<T> {
    #[serde(default)]
    pub task: Option<TaskInfo>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TaskInfo {
    pub task_id: String,
    pub state: TaskState,
    #[serde(default)]
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Waiting,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Serialize)]
struct TaskStatusRequest<'a> {
    task_id: &'a str,
}

fn auth_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| ApiError::Internal(format!("Invalid API key header: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

impl SteamshipClient {
    pub fn new(api_key: &str, base_url: &str, workspace_handle: &str) -> Result<Self> {
        let mut headers = auth_headers(api_key)?;
        headers.insert(
            "x-workspace-handle",
            HeaderValue::from_str(workspace_handle)
                .map_err(|e| ApiError::Internal(format!("Invalid workspace handle: {e}")))?,
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<TaskEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Platform call to {path} failed with {status}");
            return Err(ApiError::ExternalService(format!(
                "{path} returned {status}: {error_text}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Block until the task behind `envelope` completes and return its
    /// output. Responses that carry no task are already complete.
    pub async fn wait<T: DeserializeOwned>(&self, mut envelope: TaskEnvelope<T>) -> Result<T> {
        for _ in 0..TASK_POLL_ATTEMPTS {
            let task = match &envelope.task {
                None => {
                    return envelope.data.ok_or_else(|| {
                        ApiError::ExternalService(
                            "platform response carried neither task nor data".to_string(),
                        )
                    })
                }
                Some(task) => task,
            };

            match task.state {
                TaskState::Succeeded => {
                    return envelope.data.ok_or_else(|| {
                        ApiError::ExternalService(
                            "succeeded task carried no output".to_string(),
                        )
                    })
                }
                TaskState::Failed => {
                    let message = task
                        .status_message
                        .clone()
                        .unwrap_or_else(|| "task failed".to_string());
                    return Err(ApiError::TaskFailed(message));
                }
                TaskState::Waiting | TaskState::Running => {
                    let task_id = task.task_id.clone();
                    sleep(TASK_POLL_INTERVAL).await;
                    envelope = self
                        .post("task/status", &TaskStatusRequest { task_id: &task_id })
                        .await?;
                }
            }
        }

        Err(ApiError::TaskFailed(format!(
            "task did not complete within {TASK_POLL_ATTEMPTS} polls"
        )))
    }

    pub async fn post_and_wait<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.post(path, body).await?;
        self.wait(envelope).await
    }
}

/// Client for invoking operations on the deployed package instance, used by
/// the operator scripts. The invocation base is derived from the workspace
/// and instance handles in [`Config`].
#[derive(Debug, Clone)]
pub struct PackageClient {
    http: Client,
    base_url: String,
}

impl PackageClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = auth_headers(&config.steamship_api_key)?;
        headers.insert(
            "x-package-version",
            HeaderValue::from_str(&config.version_handle)
                .map_err(|e| ApiError::Internal(format!("Invalid version handle: {e}")))?,
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.package_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn invoke<B, T>(&self, operation: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, operation))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(ApiError::ExternalService(format!(
                "{operation} returned {status}: {error_text}"
            )));
        }

        Ok(response.json().await?)
    }
}
