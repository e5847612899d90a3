use thiserror::Error;

use crate::models::ErrorKind;

/// 应用程序错误类型
///
/// 只用于"批次之外"的错误（配置、扫描目录等），
/// 单个文件的上传失败不会走这里，而是记录为 `UploadOutcome::Failure`
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 设置文件 JSON 解析失败
    #[error("设置文件 JSON 解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 设置文件 TOML 解析失败
    #[error("设置文件 TOML 解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 设置序列化失败
    #[error("设置序列化失败: {0}")]
    SerializeFailed(String),
    /// HTTP 客户端创建失败
    #[error("HTTP 客户端创建失败: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 单个上传任务的错误
///
/// 每个变体对应一个 `ErrorKind`，最终被折叠成 `UploadStatus::Failure`
#[derive(Debug, Error)]
pub enum UploadError {
    /// 网络层失败（连接拒绝、超时、DNS、TLS、URL 非法）
    #[error("请求失败 ({url}): {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 收到响应但读取响应体失败
    #[error("读取响应体失败 ({url}): {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 收到响应但响应体为空
    #[error("响应体为空 ({url}, HTTP {status})")]
    EmptyBody { url: String, status: u16 },
    /// 严格模式下的非 2xx 响应
    #[error("HTTP {status} ({url})")]
    HttpStatus { url: String, status: u16 },
    /// 结果写入失败
    #[error("保存结果失败 ({id}): {source}")]
    Persist {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

impl UploadError {
    /// 对应的错误分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Network { .. } => ErrorKind::Network,
            UploadError::BodyRead { .. } | UploadError::EmptyBody { .. } => ErrorKind::BodyRead,
            UploadError::HttpStatus { .. } => ErrorKind::HttpStatus,
            UploadError::Persist { .. } => ErrorKind::Persist,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_kind_mapping() {
        let empty = UploadError::EmptyBody {
            url: "http://localhost/upload".to_string(),
            status: 204,
        };
        assert_eq!(empty.kind(), ErrorKind::BodyRead);

        let persist = UploadError::Persist {
            id: "a.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(persist.kind(), ErrorKind::Persist);
        assert!(persist.to_string().contains("a.json"));
    }

    #[test]
    fn test_app_error_display_wraps_inner() {
        let err: AppError = FileError::DirectoryNotFound {
            path: "test-input".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "文件错误: 目录不存在: test-input");
    }
}
