//! 上传结果
//!
//! 每个任务恰好产生一个 `UploadOutcome`，汇总进 `BatchResult`

use std::collections::HashMap;
use std::fmt;

/// 失败分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 网络层失败（含超时）
    Network,
    /// 收到响应，但响应体不可读或为空
    BodyRead,
    /// 网络交互成功，但结果写入失败
    Persist,
    /// 严格模式下收到非 2xx 状态码
    HttpStatus,
    /// 执行该任务的异步任务异常终止（panic 或被取消）
    Aborted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "NetworkError",
            ErrorKind::BodyRead => "BodyReadError",
            ErrorKind::Persist => "PersistError",
            ErrorKind::HttpStatus => "HttpStatusError",
            ErrorKind::Aborted => "AbortedError",
        };
        f.write_str(name)
    }
}

/// 单个任务的终态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    /// 响应已写入结果目录
    Success { bytes_written: usize },
    /// 失败
    Failure { kind: ErrorKind, detail: String },
}

/// 单个任务的上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub id: String,
    pub status: UploadStatus,
}

impl UploadOutcome {
    pub fn success(id: impl Into<String>, bytes_written: usize) -> Self {
        Self {
            id: id.into(),
            status: UploadStatus::Success { bytes_written },
        }
    }

    pub fn failure(id: impl Into<String>, kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: UploadStatus::Failure {
                kind,
                detail: detail.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Success { .. })
    }

    /// 失败分类，成功时为 `None`
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match &self.status {
            UploadStatus::Success { .. } => None,
            UploadStatus::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// 整个批次的结果，按任务 id 索引
///
/// 与提交顺序无关；重复 id 时后写入者覆盖前者
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    outcomes: HashMap<String, UploadOutcome>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: HashMap::with_capacity(capacity),
        }
    }

    /// 记录一个结果，返回被覆盖的旧结果（如果有）
    pub fn record(&mut self, outcome: UploadOutcome) -> Option<UploadOutcome> {
        self.outcomes.insert(outcome.id.clone(), outcome)
    }

    pub fn get(&self, id: &str) -> Option<&UploadOutcome> {
        self.outcomes.get(id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadOutcome> {
        self.outcomes.values()
    }

    pub fn success_count(&self) -> usize {
        self.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// 所有失败的结果，按 id 排序，方便输出报告
    pub fn failures(&self) -> Vec<&UploadOutcome> {
        let mut failed: Vec<_> = self.iter().filter(|o| !o.is_success()).collect();
        failed.sort_by(|a, b| a.id.cmp(&b.id));
        failed
    }
}

impl IntoIterator for BatchResult {
    type Item = (String, UploadOutcome);
    type IntoIter = std::collections::hash_map::IntoIter<String, UploadOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
