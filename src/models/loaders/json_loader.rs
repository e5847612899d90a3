use crate::error::{AppError, AppResult, FileError};
use crate::models::task::UploadTask;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 文件名是否属于待上传的文档
///
/// 只看文件名是否包含 `.json` 或 `.geojson`，不要求是后缀
pub fn is_upload_candidate(file_name: &str) -> bool {
    file_name.contains(".json") || file_name.contains(".geojson")
}

/// 从文件夹中加载所有待上传的文档
///
/// 读取失败的条目直接跳过（只记录 warn），不会让整个扫描失败：
/// 失效的符号链接、名字匹配的子目录都走这条路径。符号链接会被跟随读取。
/// 返回结果按文件名排序。
///
/// 文件夹不存在或无法列出时返回错误，而不是当作"没有文件"静默结束，
/// 这样配置写错目录时能直接看到原因。
pub async fn load_upload_tasks(folder_path: impl AsRef<Path>) -> AppResult<Vec<UploadTask>> {
    let folder = PathBuf::from(folder_path.as_ref());
    let display = folder.display().to_string();

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound { path: display }.into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    let mut candidates = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?
    {
        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_upload_candidate(&file_name) {
            candidates.push((file_name, entry.path()));
        }
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut tasks = Vec::with_capacity(candidates.len());
    for (file_name, path) in candidates {
        match fs::read(&path).await {
            Ok(payload) => {
                tracing::debug!("已加载: {} ({} 字节)", file_name, payload.len());
                tasks.push(UploadTask::new(file_name, payload));
            }
            Err(e) => {
                tracing::warn!("读取文件失败，已跳过 {}: {}", path.display(), e);
            }
        }
    }

    Ok(tasks)
}
