/// 上传 HTTP 客户端
///
/// 封装所有与目标服务的 HTTP 交互
use crate::config::Config;
use crate::error::{AppResult, ConfigError, UploadError};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// 已收到的响应（状态码 + 完整响应体）
#[derive(Debug, Clone)]
pub struct UploadResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// 上传客户端
///
/// 内部的 `reqwest::Client` 自带连接池，clone 开销很小，可以在任务间共享
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    verify_tls: bool,
}

impl UploadClient {
    /// 根据配置创建客户端
    ///
    /// 默认校验服务端证书，只有显式设置 `accept_invalid_certs` 才会关闭。
    /// 设置文件里的 `usessl` 不参与这里的判断。
    pub fn new(config: &Config) -> AppResult<Self> {
        Self::with_options(config.request_timeout(), !config.accept_invalid_certs)
    }

    /// 使用自定义超时创建客户端
    pub fn with_options(timeout: Duration, verify_tls: bool) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { http, verify_tls })
    }

    /// 是否校验服务端证书
    pub fn verifies_certificates(&self) -> bool {
        self.verify_tls
    }

    /// 以 JSON 形式 POST 数据，并读取完整响应体
    ///
    /// 只区分"网络失败"和"响应体读取失败"，状态码原样返回给调用方判断
    pub async fn post_json(&self, url: &str, payload: Bytes) -> Result<UploadResponse, UploadError> {
        debug!("POST {} ({} 字节)", url, payload.len());

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|source| UploadError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| UploadError::BodyRead {
            url: url.to_string(),
            source,
        })?;

        debug!("POST {} -> HTTP {} ({} 字节)", url, status.as_u16(), body.len());

        Ok(UploadResponse { status, body })
    }
}
