//! `tally-cli`: runs the sales pipeline end to end and writes its exports.

pub mod config;
pub mod export;
pub mod pipeline;
pub mod report;

pub use config::PipelineConfig;
pub use export::{ExportError, ExportPaths, write_exports};
pub use pipeline::{
    IngestSummary, PipelineError, PipelineOutput, run_and_export, run_path, run_records,
};
pub use report::render_summary;
