//! 结果写入服务 - 业务能力层
//!
//! 只负责"把响应写到某处"，不关心上传流程

use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 结果写入能力
///
/// 每个任务 id 对应一个独立的目标，不同任务之间的写入互不干扰
pub trait ResultSink: Send + Sync + 'static {
    /// 保存某个任务的响应体
    fn persist(&self, id: &str, bytes: &[u8]) -> impl Future<Output = io::Result<()>> + Send;
}

impl<S: ResultSink> ResultSink for Arc<S> {
    fn persist(&self, id: &str, bytes: &[u8]) -> impl Future<Output = io::Result<()>> + Send {
        (**self).persist(id, bytes)
    }
}

/// 写入本地目录的结果服务
///
/// 响应保存为 `<dir>/<id>`，已存在则覆盖
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 某个任务对应的结果文件路径
    ///
    /// id 必须是单个普通文件名，绝对路径、`..`、带目录分隔符的 id 都会被拒绝，
    /// 保证结果只会写在 `dir` 之下
    pub fn path_for(&self, id: &str) -> io::Result<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == id => Ok(self.dir.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("非法的结果文件名: {:?}", id),
            )),
        }
    }

    /// 确保结果目录存在
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }
}

impl ResultSink for FileSink {
    async fn persist(&self, id: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.path_for(id)?;
        debug!("写入结果: {} ({} 字节)", path.display(), bytes.len());
        tokio::fs::write(&path, bytes).await
    }
}
