pub mod aggregator;
pub mod file_parser;
pub mod line_parser;

pub use crate::domain::model::{
    AggregateOutcome, AggregateResponse, FileListing, FileResult, LineRejection, ParsedRecord,
};
pub use crate::domain::ports::{DiagnosticSink, FileSource};
pub use crate::utils::error::Result;
