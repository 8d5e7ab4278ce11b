// roster-client/src/http.rs
// HTTP 客户端 - 远程员工集合

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::models::{EmployeeId, EmployeePayload, RawEmployee};

use crate::config::ClientConfig;
use crate::error::{ClientResult, NetworkError};

pub(crate) const LIST_FAILED: &str = "Failed to fetch employees";
pub(crate) const CREATE_FAILED: &str = "Failed to create employee";

pub(crate) fn update_failed(id: EmployeeId) -> String {
    format!("Failed to update employee {id}")
}

pub(crate) fn delete_failed(id: EmployeeId) -> String {
    format!("Failed to delete employee {id}")
}

/// Remote employee collection
///
/// One attempt per call, no retries. Implementations own no view state.
/// Any 2xx reply to `create`/`update` is a success; when its body is not a
/// record, the returned record echoes the payload that was sent.
#[async_trait]
pub trait CollectionClient: Send + Sync {
    /// `GET {base}`
    async fn list(&self) -> ClientResult<Vec<RawEmployee>>;
    /// `POST {base}`
    async fn create(&self, payload: &EmployeePayload) -> ClientResult<RawEmployee>;
    /// `PUT {base}/{id}`
    async fn update(
        &self,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> ClientResult<RawEmployee>;
    /// `DELETE {base}/{id}`
    async fn remove(&self, id: EmployeeId) -> ClientResult<()>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkCollectionClient {
    client: Client,
    base_url: String,
}

impl NetworkCollectionClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout.filter(|s| *s > 0) {
            builder = builder.timeout(std::time::Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| NetworkError::transport("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: EmployeeId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(%method, url, "sending request");
        self.client.request(method, url)
    }

    /// 发送请求，非 2xx 统一视为失败
    async fn send(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> ClientResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "{action}");
            NetworkError::transport(action, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "{action}");
            return Err(NetworkError::status(action, status, &body));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> ClientResult<T> {
        let response = self.send(request, action).await?;
        response
            .json()
            .await
            .map_err(|e| NetworkError::transport(action, e))
    }

    /// 写请求：2xx 即成功，响应体不是记录时回显请求体
    async fn send_record(
        &self,
        request: RequestBuilder,
        action: &str,
        id: Option<EmployeeId>,
        payload: &EmployeePayload,
    ) -> ClientResult<RawEmployee> {
        let response = self.send(request, action).await?;
        let body = response.bytes().await.unwrap_or_default();
        match serde_json::from_slice::<RawEmployee>(&body) {
            Ok(mut record) => {
                if record.id.is_none() {
                    record.id = id.map(Into::into);
                }
                Ok(record)
            }
            Err(e) => {
                tracing::debug!(error = %e, "{action}: reply carried no record");
                Ok(RawEmployee::from_payload(id, payload))
            }
        }
    }
}

#[async_trait]
impl CollectionClient for NetworkCollectionClient {
    async fn list(&self) -> ClientResult<Vec<RawEmployee>> {
        let request = self.request(Method::GET, &self.base_url);
        self.send_json(request, LIST_FAILED).await
    }

    async fn create(&self, payload: &EmployeePayload) -> ClientResult<RawEmployee> {
        let request = self.request(Method::POST, &self.base_url).json(payload);
        self.send_record(request, CREATE_FAILED, None, payload).await
    }

    async fn update(
        &self,
        id: EmployeeId,
        payload: &EmployeePayload,
    ) -> ClientResult<RawEmployee> {
        let url = self.item_url(id);
        let request = self.request(Method::PUT, &url).json(payload);
        self.send_record(request, &update_failed(id), Some(id), payload)
            .await
    }

    async fn remove(&self, id: EmployeeId) -> ClientResult<()> {
        let url = self.item_url(id);
        let request = self.request(Method::DELETE, &url);
        // 响应体不需要
        self.send(request, &delete_failed(id)).await?;
        Ok(())
    }
}
