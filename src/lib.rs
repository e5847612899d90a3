//! # JSON Batch Upload
//!
//! 批量上传本地 JSON / GeoJSON 文档到指定 HTTP 端点，并把每个响应保存到本地
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有 HTTP 连接池，只暴露能力
//! - `UploadClient` - POST 文档并读取完整响应体
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ResultSink` / `FileSink` - 写入结果能力
//! - `prompt` - 交互式收集设置、选择端点
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的完整上传流程
//! - `UploadFlow` - POST → 检查响应 → 写入结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_uploader` - 批量上传器，管理并发和结果汇总
//! - `orchestrator/app` - 应用入口，串联设置、扫描和上传
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::UploadClient;
pub use config::{Config, Settings};
pub use error::{AppError, AppResult, UploadError};
pub use models::{BatchResult, Endpoint, ErrorKind, UploadOutcome, UploadStatus, UploadTask};
pub use orchestrator::{App, BatchUploader};
pub use services::{FileSink, ResultSink};
pub use workflow::UploadFlow;
