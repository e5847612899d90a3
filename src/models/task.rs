//! 上传任务与目标端点

use bytes::Bytes;

/// 单个上传任务
///
/// 创建后不可变；`payload` 使用 `Bytes`，在并发任务之间共享无需拷贝
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    id: String,
    payload: Bytes,
}

impl UploadTask {
    /// 创建新的上传任务
    ///
    /// `id` 通常是输入文件名，同时也是结果文件名
    pub fn new(id: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}

/// 上传目标
///
/// 目标 URL 就是 `base_url + path` 的简单拼接，这里不做任何校验，
/// 非法 URL 会在发送时变成该任务的网络错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub path: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
        }
    }

    /// 完整的目标 URL
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_is_plain_concatenation() {
        let endpoint = Endpoint::new("http://mock", "/upload");
        assert_eq!(endpoint.url(), "http://mock/upload");

        // 不补斜杠，也不校验
        let endpoint = Endpoint::new("http://mock", "upload");
        assert_eq!(endpoint.url(), "http://mockupload");
    }

    #[test]
    fn test_upload_task_accessors() {
        let task = UploadTask::new("b.json", r#"{"x":1}"#.as_bytes().to_vec());
        assert_eq!(task.id(), "b.json");
        assert_eq!(task.payload().len(), 7);
    }
}
