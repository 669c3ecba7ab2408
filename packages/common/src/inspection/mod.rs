mod collector;
mod error;
mod expander;
pub mod memory;
mod pipeline;
mod resolver;
mod store;
pub mod types;
mod writer;

pub use collector::AssetCollector;
pub use error::{LookupStage, PipelineError};
pub use expander::LocationExpander;
pub use pipeline::PassAllAssets;
pub use resolver::TemplateResolver;
pub use store::{ChunkTransaction, DEFAULT_MAX_BIND_PARAMS, InspectionStore, StoreError};
pub use types::{PassOutcome, TemplateSet};
pub use writer::{BatchWriter, DEFAULT_CHUNK_SIZE, WriteSummary};
