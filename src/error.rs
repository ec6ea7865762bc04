use crate::store::{StoreError, TopologyError};

/// Errors related to [MaskController](crate::MaskController) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A store buffer could not be enabled. The mask was not updated; call
    /// [resync](crate::MaskController::resync) before trusting it again.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An adjacency rebuild failed. The mask was not updated; call
    /// [resync](crate::MaskController::resync) before trusting it again.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}
