pub mod config;
pub mod contacts;
pub mod error;
pub mod ingest;
pub mod mapping;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod signers;
pub mod summary;

pub use config::{LinkMode, RunContext, RunParams};
pub use error::{BatchError, PipelineError};
pub use pipeline::{run, run_combined, RunOutput, UploadSheets};
