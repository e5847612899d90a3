//! 单个文件的上传流程 - 流程层
//!
//! 流程顺序：
//! 1. POST 文档 → 读取完整响应体
//! 2. （严格模式）检查状态码
//! 3. 写入结果目录
//!
//! 任何一步失败都只影响当前文件，并且恰好产生一个 `UploadOutcome`

use std::sync::Arc;
use tracing::debug;

use crate::clients::UploadClient;
use crate::error::UploadError;
use crate::models::{Endpoint, UploadOutcome, UploadTask};
use crate::services::ResultSink;

/// 单个文件的上传流程
///
/// - 不重试
/// - 不持有任务数据，只读取
/// - 不做日志上报决策，失败原因全部放进 `UploadOutcome`
pub struct UploadFlow<S> {
    client: UploadClient,
    sink: Arc<S>,
    strict_status: bool,
}

impl<S> Clone for UploadFlow<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            sink: Arc::clone(&self.sink),
            strict_status: self.strict_status,
        }
    }
}

impl<S: ResultSink> UploadFlow<S> {
    pub fn new(client: UploadClient, sink: Arc<S>) -> Self {
        Self {
            client,
            sink,
            strict_status: false,
        }
    }

    /// 非 2xx 状态码是否视为失败（默认不视为失败）
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.strict_status = strict;
        self
    }

    /// 上传单个文件，返回该文件的最终结果
    pub async fn run(&self, endpoint: &Endpoint, task: &UploadTask) -> UploadOutcome {
        match self.try_run(endpoint, task).await {
            Ok(bytes_written) => {
                debug!("[{}] ✓ 上传完成，写入 {} 字节", task.id(), bytes_written);
                UploadOutcome::success(task.id(), bytes_written)
            }
            Err(e) => {
                debug!("[{}] ❌ {}", task.id(), e);
                UploadOutcome::failure(task.id(), e.kind(), e.to_string())
            }
        }
    }

    async fn try_run(&self, endpoint: &Endpoint, task: &UploadTask) -> Result<usize, UploadError> {
        let url = endpoint.url();

        let response = self.client.post_json(&url, task.payload().clone()).await?;

        let status = response.status.as_u16();
        if self.strict_status && !response.status.is_success() {
            return Err(UploadError::HttpStatus { url, status });
        }

        if response.body.is_empty() {
            return Err(UploadError::EmptyBody { url, status });
        }

        self.sink
            .persist(task.id(), &response.body)
            .await
            .map_err(|source| UploadError::Persist {
                id: task.id().to_string(),
                source,
            })?;

        Ok(response.body.len())
    }
}
