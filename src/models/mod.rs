pub mod loaders;
pub mod outcome;
pub mod task;

pub use loaders::{is_upload_candidate, load_upload_tasks};
pub use outcome::{BatchResult, ErrorKind, UploadOutcome, UploadStatus};
pub use task::{Endpoint, UploadTask};
