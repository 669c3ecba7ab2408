use std::fmt;

use thiserror::Error;

use super::store::StoreError;

/// Read stage that failed during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    Locations,
    Assets,
    GroupTemplates,
    ItemTemplates,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Locations => "fetching child locations",
            Self::Assets => "fetching assets for locations",
            Self::GroupTemplates => "fetching check group templates",
            Self::ItemTemplates => "fetching check item templates",
        })
    }
}

/// Errors that abort a pass-all-assets run.
///
/// Nothing is retried. A `Write` error means the failing chunk was rolled
/// back, but every chunk before it stays committed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error {stage}: {source}")]
    Lookup {
        stage: LookupStage,
        source: StoreError,
    },

    #[error(
        "Error writing chunk {} of {total_chunks} ({chunk} earlier chunks remain committed): {source}",
        .chunk + 1
    )]
    Write {
        /// 0-based index of the chunk that was rolled back.
        chunk: usize,
        total_chunks: usize,
        source: StoreError,
    },
}

impl PipelineError {
    pub(crate) fn lookup(stage: LookupStage) -> impl FnOnce(StoreError) -> Self {
        move |source| PipelineError::Lookup { stage, source }
    }

    /// Chunks that were durably written before the run stopped.
    pub fn committed_chunks(&self) -> usize {
        match self {
            PipelineError::Lookup { .. } => 0,
            PipelineError::Write { chunk, .. } => *chunk,
        }
    }
}
