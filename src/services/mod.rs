pub mod prompt;
pub mod result_sink;

pub use prompt::{choose_endpoint, collect_settings};
pub use result_sink::{FileSink, ResultSink};
