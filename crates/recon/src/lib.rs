//! `truckstock-recon` - truck inventory reconciliation engine.
//!
//! Pure engine crate: receives normalized template and on-hand records,
//! returns categorized, sorted results. No file or network IO.

pub mod classify;
pub mod consumable;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod summary;

pub use consumable::{classify_consumables, ConsumableCodes, Registry, RegistryCache};
pub use engine::{analyze, check_inputs, run};
pub use error::ReconError;
pub use model::{
    AnalysisReport, AnalysisResult, AnalysisSummary, AnalyzedItem, Category, ItemRecord, OnHandItem,
    RecordKind, TemplateItem,
};
pub use summary::summarize;
