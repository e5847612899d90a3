use crate::error::{AppError, AppResult, ConfigError};
use crate::models::Endpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 设置文件路径（保存 baseurl / usessl / endpoints）
    pub settings_file: String,
    /// 待上传文档目录
    pub input_dir: String,
    /// 响应结果目录
    pub output_dir: String,
    /// 同时上传的最大数量，0 表示不限制
    pub max_concurrent_uploads: usize,
    /// 单个请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 非 2xx 状态码是否视为失败
    pub strict_status: bool,
    /// 不校验服务端证书（仅用于自签名的测试环境）
    pub accept_invalid_certs: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_file: "settings.json".to_string(),
            input_dir: "test-input".to_string(),
            output_dir: "test-output".to_string(),
            max_concurrent_uploads: 0,
            request_timeout_secs: 30,
            strict_status: false,
            accept_invalid_certs: false,
            verbose_logging: false,
            output_log_file: "upload_log.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            settings_file: std::env::var("SETTINGS_FILE").unwrap_or(default.settings_file),
            input_dir: std::env::var("INPUT_DIR").unwrap_or(default.input_dir),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            max_concurrent_uploads: std::env::var("MAX_CONCURRENT_UPLOADS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_uploads),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            strict_status: std::env::var("STRICT_STATUS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.strict_status),
            accept_invalid_certs: std::env::var("ACCEPT_INVALID_CERTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.accept_invalid_certs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 并发上限，`None` 表示不限制
    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrent_uploads > 0).then_some(self.max_concurrent_uploads)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 持久化的上传设置
///
/// 字段名沿用已有设置文件的格式：`baseurl` / `usessl` / `endpoints`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "baseurl", default)]
    pub base_url: String,
    /// 是否使用 SSL（仅作记录，不影响证书校验）
    #[serde(rename = "usessl", default)]
    pub use_ssl: bool,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl Settings {
    /// 从设置文件加载，文件不存在时返回 `None`
    ///
    /// `.toml` 后缀按 TOML 解析，其他一律按 JSON 解析
    pub fn load(path: impl AsRef<Path>) -> AppResult<Option<Self>> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::file_read_failed(display, e)),
        };

        let settings = if is_toml(path) {
            toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
                path: display,
                source,
            })?
        } else {
            serde_json::from_str(&content).map_err(|source| ConfigError::JsonParseFailed {
                path: display,
                source,
            })?
        };

        Ok(Some(settings))
    }

    /// 保存到设置文件
    pub fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();

        let content = if is_toml(path) {
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeFailed(e.to_string()))?
        } else {
            serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::SerializeFailed(e.to_string()))?
        };

        std::fs::write(path, content)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
    }

    /// 由选中的端点路径得到上传目标
    pub fn endpoint(&self, path: impl Into<String>) -> Endpoint {
        Endpoint::new(self.base_url.clone(), path)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_limit() {
        let mut config = Config::default();
        assert_eq!(config.concurrency_limit(), None);

        config.max_concurrent_uploads = 8;
        assert_eq!(config.concurrency_limit(), Some(8));
    }

    #[test]
    fn test_settings_reads_existing_json_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"baseurl":"http://localhost:8080","usessl":true,"endpoints":["/a","/b"]}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap().unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert!(settings.use_ssl);
        assert_eq!(settings.endpoints, vec!["/a", "/b"]);
        assert_eq!(settings.endpoint("/b").url(), "http://localhost:8080/b");
    }

    #[test]
    fn test_settings_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(dir.path().join("settings.json")).unwrap().is_none());
    }

    #[test]
    fn test_settings_save_toml_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let settings = Settings {
            base_url: "https://api.example.com".to_string(),
            use_ssl: false,
            endpoints: vec!["/upload".to_string()],
        };

        settings.save(&path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("baseurl"));

        assert_eq!(Settings::load(&path).unwrap(), Some(settings));
    }

    #[test]
    fn test_settings_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::JsonParseFailed { .. })
        ));
    }
}
