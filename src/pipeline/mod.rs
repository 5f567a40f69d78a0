// Extraction pipeline: sheet ingestion, structure location, and reconciliation

pub mod extractor;
pub mod ingestion;
pub mod processing;

// Re-export key types from each stage
pub use extractor::{Extractor, SheetExtraction};
pub use ingestion::{CalamineWorkbook, MemoryWorkbook, SheetSelector, Workbook};
pub use processing::{ReconcilePolicy, StrictnessProfile};
