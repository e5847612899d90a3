//! 批量上传器 - 编排层
//!
//! ## 职责
//!
//! 1. **并发分发**：每个 `UploadTask` 对应一个 `tokio::spawn` 的任务
//! 2. **并发控制**：可选的 Semaphore 上限，不设置时全部同时发出
//! 3. **结果汇总**：每个任务通过自己的 JoinHandle 返回结果，
//!    由唯一的汇总方按完成顺序写入 `BatchResult`，不需要共享可变状态
//! 4. **完成屏障**：`run_batch` 返回时，所有任务都已结束并记录结果
//!
//! 单个任务失败（甚至 panic）只会变成一条 `Failure`，不会中断其他任务，
//! `run_batch` 本身永远不会失败。

use crate::clients::UploadClient;
use crate::config::Config;
use crate::models::{BatchResult, Endpoint, ErrorKind, UploadOutcome, UploadTask};
use crate::services::ResultSink;
use crate::workflow::UploadFlow;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// 批量上传器
pub struct BatchUploader<S> {
    flow: UploadFlow<S>,
    semaphore: Option<Arc<Semaphore>>,
}

impl<S: ResultSink> BatchUploader<S> {
    /// 创建不限并发、宽松状态码处理的上传器
    pub fn new(client: UploadClient, sink: S) -> Self {
        Self {
            flow: UploadFlow::new(client, Arc::new(sink)),
            semaphore: None,
        }
    }

    /// 按配置创建上传器（并发上限、状态码处理）
    pub fn from_config(config: &Config, client: UploadClient, sink: S) -> Self {
        Self::new(client, sink)
            .with_concurrency_limit(config.concurrency_limit())
            .strict_status(config.strict_status)
    }

    /// 设置同时进行的上传数量上限，`None` 或 `Some(0)` 表示不限制
    pub fn with_concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.semaphore = limit
            .filter(|&n| n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    /// 非 2xx 状态码是否视为失败
    pub fn strict_status(mut self, strict: bool) -> Self {
        self.flow = self.flow.strict_status(strict);
        self
    }

    /// 上传单个文件
    pub async fn upload_one(&self, endpoint: &Endpoint, task: &UploadTask) -> UploadOutcome {
        self.flow.run(endpoint, task).await
    }

    /// 并发上传所有文件，全部结束后返回汇总结果
    ///
    /// 返回的 `BatchResult` 对每个（不重复的）任务 id 恰好有一条记录
    pub async fn run_batch(&self, endpoint: &Endpoint, tasks: Vec<UploadTask>) -> BatchResult {
        if tasks.is_empty() {
            return BatchResult::new();
        }

        let total = tasks.len();
        debug!("开始批量上传: {} 个文件 -> {}", total, endpoint.url());

        let endpoint = Arc::new(endpoint.clone());
        let mut pending = FuturesUnordered::new();

        // 为每个文件创建并发任务
        for task in tasks {
            let id = task.id().to_string();
            let flow = self.flow.clone();
            let endpoint = Arc::clone(&endpoint);
            let semaphore = self.semaphore.clone();

            let handle = tokio::spawn(async move {
                // Semaphore 从不关闭，acquire 不会失败
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                flow.run(&endpoint, &task).await
            });

            pending.push(async move { (id, handle.await) });
        }

        // 等待所有任务完成，按完成顺序汇总
        let mut result = BatchResult::with_capacity(total);

        while let Some((id, joined)) = pending.next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => UploadOutcome::failure(id, ErrorKind::Aborted, e.to_string()),
            };
            result.record(outcome);
        }

        debug!(
            "批量上传结束: 成功 {}/{}",
            result.success_count(),
            result.len()
        );

        result
    }
}
