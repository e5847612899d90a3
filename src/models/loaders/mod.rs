pub mod json_loader;

pub use json_loader::{is_upload_candidate, load_upload_tasks};
