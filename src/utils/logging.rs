use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::models::{BatchResult, UploadStatus};

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`（详细模式下为 `debug`）。
/// 重复调用不会报错，方便测试中使用。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n上传日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数，`None` 表示不限制
pub fn log_startup(max_concurrent: Option<usize>) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量上传模式");
    info!("📊 最大并发数: {}", describe_limit(max_concurrent));
    info!("{}", "=".repeat(60));
}

/// 记录文件加载信息
pub fn log_tasks_loaded(total: usize, max_concurrent: Option<usize>) {
    info!("✓ 找到 {} 个待上传的文件", total);
    info!("📋 并发上限: {}", describe_limit(max_concurrent));
}

/// 逐条输出失败的文件
pub fn log_failures(result: &BatchResult) {
    for outcome in result.failures() {
        if let UploadStatus::Failure { kind, detail } = &outcome.status {
            error!("[{}] ❌ {}: {}", outcome.id, kind, detail);
        }
    }
}

/// 把失败的文件追加写入日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `result`: 批量上传结果
pub fn append_failure_report(log_file_path: &str, result: &BatchResult) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    writeln!(
        file,
        "成功: {}/{} | 失败: {}",
        result.success_count(),
        result.len(),
        result.failure_count()
    )?;

    for outcome in result.failures() {
        if let UploadStatus::Failure { kind, detail } = &outcome.status {
            writeln!(file, "{} | {} | {}", outcome.id, kind, detail)?;
        }
    }

    Ok(())
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 批量上传结果
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(result: &BatchResult, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部上传完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.success_count(), result.len());
    info!("❌ 失败: {}", result.failure_count());
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

fn describe_limit(max_concurrent: Option<usize>) -> String {
    match max_concurrent {
        Some(n) => n.to_string(),
        None => "不限制".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorKind, UploadOutcome};

    #[test]
    fn test_failure_report_appends_after_header() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("upload_log.txt");
        let log_path = log_path.to_str().unwrap();

        let mut result = BatchResult::new();
        result.record(UploadOutcome::success("a.json", 2));
        result.record(UploadOutcome::failure("b.json", ErrorKind::Network, "connection refused"));

        init_log_file(log_path).unwrap();
        append_failure_report(log_path, &result).unwrap();

        let content = fs::read_to_string(log_path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("成功: 1/2 | 失败: 1"));
        assert!(content.contains("b.json | NetworkError | connection refused"));
        assert!(!content.contains("a.json"));
    }

    #[test]
    fn test_describe_limit() {
        assert_eq!(describe_limit(Some(4)), "4");
        assert_eq!(describe_limit(None), "不限制");
    }
}
