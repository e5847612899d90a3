//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写日志文件头、加载（或交互式创建）设置、创建 HTTP 客户端
//! 2. **端点选择**：从设置中的端点列表选择本次目标
//! 3. **批量加载**：扫描输入目录，得到 `Vec<UploadTask>`
//! 4. **批量上传**：委托 `BatchUploader`
//! 5. **全局统计**：输出失败明细和汇总结果

use crate::clients::UploadClient;
use crate::config::{Config, Settings};
use crate::models::{self, BatchResult};
use crate::orchestrator::BatchUploader;
use crate::services::{self, FileSink};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::io;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    settings: Settings,
    sink: FileSink,
    uploader: BatchUploader<FileSink>,
}

impl App {
    /// 初始化应用
    ///
    /// 设置文件不存在时，会在终端中交互式创建并保存
    pub async fn initialize(config: Config) -> Result<Self> {
        let settings = match Settings::load(&config.settings_file)? {
            Some(settings) => settings,
            None => {
                let settings = services::collect_settings(&mut io::stdin().lock(), &mut io::stdout())?;
                settings.save(&config.settings_file)?;
                info!("💾 设置已保存至: {}", config.settings_file);
                settings
            }
        };

        Self::with_settings(config, settings)
    }

    /// 使用已有的设置初始化应用
    pub fn with_settings(config: Config, settings: Settings) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        logging::log_startup(config.concurrency_limit());

        let client = UploadClient::new(&config)?;
        let sink = FileSink::new(&config.output_dir);
        let uploader = BatchUploader::from_config(&config, client, sink.clone());

        Ok(Self {
            config,
            settings,
            sink,
            uploader,
        })
    }

    /// 运行应用主逻辑：选择端点后上传
    pub async fn run(&self) -> Result<BatchResult> {
        let endpoint_path = services::choose_endpoint(&self.settings, &mut io::stdin().lock(), &mut io::stdout())?;
        self.run_with_endpoint(&endpoint_path).await
    }

    /// 上传输入目录中的所有文件到指定端点
    pub async fn run_with_endpoint(&self, endpoint_path: &str) -> Result<BatchResult> {
        let endpoint = self.settings.endpoint(endpoint_path);
        info!("🎯 上传目标: {}", endpoint.url());

        // 加载所有待上传的文件
        info!("\n📁 正在扫描待上传的文件...");
        let tasks = models::load_upload_tasks(&self.config.input_dir).await?;

        if tasks.is_empty() {
            warn!("⚠️ 没有找到待上传的 JSON 文件，程序结束");
            return Ok(BatchResult::new());
        }

        logging::log_tasks_loaded(tasks.len(), self.config.concurrency_limit());

        self.sink
            .ensure_dir()
            .await
            .with_context(|| format!("无法创建结果目录: {}", self.sink.dir().display()))?;

        let result = self.uploader.run_batch(&endpoint, tasks).await;

        // 输出最终统计
        logging::log_failures(&result);
        logging::append_failure_report(&self.config.output_log_file, &result)?;
        logging::print_final_stats(&result, &self.config.output_log_file);

        Ok(result)
    }
}
