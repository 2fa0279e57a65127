//! `ledgerkeep-infra` — storage backends for the ledger service.
//!
//! Two interchangeable backends sit behind the same traits: an in-memory
//! store (dev/test) and a local JSON-file store. Both enforce the uniqueness
//! rules *inside* their commit boundary, so read-modify-write sequences like
//! "duplicate check then insert" commit atomically.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::LedgerStore;

use std::sync::Arc;

use ledgerkeep_auth::PrincipalStore;
use ledgerkeep_core::{DomainError, DomainResult};

/// Both sides of one storage backend.
///
/// The two handles always point at the same backend instance, so principal
/// and ledger mutations share a commit boundary.
#[derive(Clone)]
pub struct StoreHandle {
    pub principals: Arc<dyn PrincipalStore>,
    pub ledger: Arc<dyn LedgerStore>,
}

impl StoreHandle {
    fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: PrincipalStore + LedgerStore + 'static,
    {
        Self {
            principals: backend.clone(),
            ledger: backend,
        }
    }

    /// In-memory backend (dev/test default).
    pub fn in_memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()))
    }
}

/// Open a storage backend from a connection descriptor.
///
/// Supported schemes: `memory:` and `file:<path>`. Anything else is a
/// configuration error (startup-fatal for the binary).
pub fn open_store(descriptor: &str) -> DomainResult<StoreHandle> {
    if descriptor == "memory:" || descriptor == "memory" {
        tracing::info!("storage backend: in-memory");
        return Ok(StoreHandle::in_memory());
    }

    if let Some(path) = descriptor.strip_prefix("file:") {
        if path.is_empty() {
            return Err(DomainError::validation(
                "file storage descriptor is missing a path",
            ));
        }
        tracing::info!(path, "storage backend: local file");
        return Ok(StoreHandle::from_backend(Arc::new(FileStore::open(path)?)));
    }

    Err(DomainError::validation(format!(
        "unsupported storage descriptor '{descriptor}' (expected 'memory:' or 'file:<path>')"
    )))
}
