use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::storage::{SessionStore, TOKEN_KEY};

/// 不附带令牌的接口前缀
const UNAUTHENTICATED_PREFIX: &str = "auth/";

/// 后端 HTTP 传输层
///
/// 除登录接口外，每个请求都从存储中读取当前令牌并附加 Bearer 头。
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, builder: RequestBuilder, path: &str) -> RequestBuilder {
        if path.trim_start_matches('/').starts_with(UNAUTHENTICATED_PREFIX) {
            return builder;
        }
        match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                tracing::warn!("Failed to read token for {}: {}", path, e);
                builder
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(self.client.get(self.url(path)), path);
        Self::parse(builder.send().await?).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(self.client.get(self.url(path)).query(query), path);
        Self::parse(builder.send().await?).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(self.client.post(self.url(path)).json(body), path);
        Self::parse(builder.send().await?).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(self.client.put(self.url(path)).json(body), path);
        Self::parse(builder.send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let builder = self.request(self.client.delete(self.url(path)), path);
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn rejection(response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Request failed - Status: {}, Body: {}", status, body);

        if status == StatusCode::CONFLICT {
            return ClientError::DuplicateEmail;
        }
        ClientError::Rejected {
            status,
            message: extract_message(status, &body),
        }
    }
}

/// 后端错误体可能是纯文本、{"error": ..} 或 {"message": ..}
pub(crate) fn extract_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unknown error occurred")
            .to_string();
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => ["error", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()),
        Ok(serde_json::Value::String(s)) => s,
        _ => trimmed.to_string(),
    }
}
