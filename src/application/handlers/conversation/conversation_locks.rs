//! Per-conversation serialization of queries within one process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::ConversationId;

/// Registry of async locks keyed by conversation.
///
/// Entries are weak: a lock lives only while some query holds or awaits it,
/// and dead entries are pruned on the next acquisition.
#[derive(Debug, Default)]
pub struct ConversationLocks {
    entries: Mutex<HashMap<ConversationId, Weak<AsyncMutex<()>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other query holds `id`, then holds it until the guard drops.
    pub async fn acquire(&self, id: ConversationId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut entries = self.entries();
            entries.retain(|_, weak| weak.strong_count() > 0);
            match entries.get(&id).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    let lock = Arc::new(AsyncMutex::new(()));
                    entries.insert(id, Arc::downgrade(&lock));
                    lock
                }
            }
        };
        lock.lock_owned().await
    }

    /// Number of conversations with a live lock.
    pub fn tracked(&self) -> usize {
        self.entries()
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ConversationId, Weak<AsyncMutex<()>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
