//! Identity index: point lookups over the revalidated dataset.

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{RevalidatingCache, RevalidateError};

use super::table::CrossRefTable;
use super::types::{CrossRefRecord, IdSystem, IdValue};
use super::CrossRefError;

/// In-process state: the current table and whether it was confirmed fresh
/// during this process lifetime.
#[derive(Default)]
struct TableState {
    table: CrossRefTable,
    fresh: bool,
}

/// Cross-reference lookups backed by a [`RevalidatingCache`].
///
/// The first lookup in a process resolves the record snapshot through the
/// cache (zero, one conditional, or one full network call); once resolved,
/// the table and its derived indexes are reused for every later lookup
/// without touching the cache again.
pub struct IdentityIndex {
    cache: RevalidatingCache<Vec<CrossRefRecord>, CrossRefError>,
    state: RwLock<TableState>,
}

impl IdentityIndex {
    pub fn new(cache: RevalidatingCache<Vec<CrossRefRecord>, CrossRefError>) -> Self {
        Self {
            cache,
            state: RwLock::new(TableState::default()),
        }
    }

    /// Look up the record whose `system` ID equals `id`.
    ///
    /// An absent ID is `Ok(None)`, not an error. A refresh failure fails
    /// the lookup unless the cache could degrade to a stale snapshot (see
    /// [`RevalidatingCache`]).
    pub async fn lookup(
        &self,
        system: IdSystem,
        id: &IdValue,
    ) -> Result<Option<CrossRefRecord>, CrossRefError> {
        {
            let mut state = self.state.write().await;
            if state.fresh {
                return Ok(state.table.lookup(system, id).cloned());
            }
        }

        let records = self.cache.get().await?;

        let mut state = self.state.write().await;
        // A racing lookup may have installed the table already; replacing
        // it with our equally-current snapshot is harmless, keeping it
        // avoids discarding indexes it may have built.
        if !state.fresh {
            debug!(records = records.len(), "identity table installed");
            state.table = CrossRefTable::new(records);
            state.fresh = true;
        }
        Ok(state.table.lookup(system, id).cloned())
    }
}

impl From<RevalidateError<CrossRefError>> for CrossRefError {
    fn from(err: RevalidateError<CrossRefError>) -> Self {
        match err {
            RevalidateError::Refresh(e) => e,
            RevalidateError::Decode(e) => CrossRefError::Cache(e.to_string()),
            RevalidateError::MissingBaseline => {
                CrossRefError::Cache("not-modified without a cached baseline".to_string())
            }
        }
    }
}
