pub mod check_status;
pub mod inspection;

pub use check_status::CheckStatus;
pub use inspection::{
    InspectionStore, PassAllAssets, PassOutcome, PipelineError, StoreError, TemplateSet,
};
