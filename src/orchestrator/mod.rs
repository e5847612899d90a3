//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_uploader` - 批量上传器
//! - 每个文件启动一个独立的异步任务（可选并发上限）
//! - 汇总每个文件的结果到 `BatchResult`
//! - 所有任务结束后才返回，单个失败不影响其他文件
//!
//! ### `app` - 应用入口
//! - 加载 / 收集设置，选择端点
//! - 扫描输入目录，调用批量上传器
//! - 输出统计信息和失败报告
//!
//! ## 层次关系
//!
//! ```text
//! app (设置、端点、扫描目录)
//!     ↓
//! batch_uploader (处理 Vec<UploadTask>)
//!     ↓
//! workflow::UploadFlow (处理单个 UploadTask)
//!     ↓
//! clients / services (HTTP 客户端、结果写入)
//! ```

pub mod app;
pub mod batch_uploader;

pub use app::App;
pub use batch_uploader::BatchUploader;
