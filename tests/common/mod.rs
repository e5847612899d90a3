#![allow(dead_code)]

use json_batch_upload::{ResultSink, UploadClient, UploadTask};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use wiremock::{Request, Respond, ResponseTemplate};

/// 原样返回请求体的 mock 响应
pub struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_bytes(request.body.clone())
    }
}

/// 保存在内存中的结果
#[derive(Default)]
pub struct MemorySink {
    saved: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySink {
    pub fn get(&self, id: &str) -> Option<Vec<u8>> {
        self.saved.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

impl ResultSink for MemorySink {
    async fn persist(&self, id: &str, bytes: &[u8]) -> io::Result<()> {
        self.saved
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// 对指定 id 写入失败的结果服务
pub struct FailingSink {
    pub fail_id: String,
}

impl ResultSink for FailingSink {
    async fn persist(&self, id: &str, _bytes: &[u8]) -> io::Result<()> {
        if id == self.fail_id {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        Ok(())
    }
}

/// 对指定 id 直接 panic 的结果服务
pub struct PanickingSink {
    pub panic_id: String,
}

impl ResultSink for PanickingSink {
    async fn persist(&self, id: &str, _bytes: &[u8]) -> io::Result<()> {
        if id == self.panic_id {
            panic!("sink exploded for {}", id);
        }
        Ok(())
    }
}

/// 记录同时进行的写入数量峰值
#[derive(Default)]
pub struct CountingSink {
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

impl ResultSink for CountingSink {
    async fn persist(&self, _id: &str, _bytes: &[u8]) -> io::Result<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn client(timeout: Duration) -> UploadClient {
    UploadClient::with_options(timeout, true).unwrap()
}

/// `doc-0.json` .. `doc-{n-1}.json`，内容各不相同
pub fn numbered_tasks(n: usize) -> Vec<UploadTask> {
    (0..n)
        .map(|i| UploadTask::new(format!("doc-{}.json", i), format!(r#"{{"n":{}}}"#, i).into_bytes()))
        .collect()
}

/// 一个确定没有服务监听的本地地址
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
