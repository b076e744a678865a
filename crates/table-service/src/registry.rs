use std::collections::HashMap;
use std::sync::RwLock;

use holdem_domain::{PlayerToken, TableId};
use holdem_engine::PushEvent;
use tokio::sync::{broadcast, mpsc};

use crate::actor::TableMsg;

/// Address of one table actor: its mailbox plus the push-event fan-out.
#[derive(Debug, Clone)]
pub struct TableHandle {
    id: TableId,
    sender: mpsc::Sender<TableMsg>,
    events: broadcast::Sender<PushEvent>,
}

impl TableHandle {
    #[must_use]
    pub fn new(
        id: TableId,
        sender: mpsc::Sender<TableMsg>,
        events: broadcast::Sender<PushEvent>,
    ) -> Self {
        Self { id, sender, events }
    }

    #[must_use]
    pub fn id(&self) -> TableId {
        self.id
    }

    #[must_use]
    pub fn sender(&self) -> mpsc::Sender<TableMsg> {
        self.sender.clone()
    }

    /// New push-channel subscription. A player may hold any number of these;
    /// delivery is best-effort and every event is self-contained.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PushEvent> {
        self.events.subscribe()
    }
}

#[derive(Default)]
struct RegistryInner {
    tables: HashMap<TableId, TableHandle>,
    tokens: HashMap<PlayerToken, TableId>,
}

/// The only cross-table shared structure: table directory plus the
/// token-to-table routing map. Written on join/leave/create, read everywhere.
#[derive(Default)]
pub struct TableRegistry {
    inner: RwLock<RegistryInner>,
}

impl TableRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_table(&self, handle: TableHandle) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.tables.insert(handle.id(), handle);
    }

    pub fn remove_table(&self, id: &TableId) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.tables.remove(id);
        inner.tokens.retain(|_, table| table != id);
    }

    #[must_use]
    pub fn table(&self, id: &TableId) -> Option<TableHandle> {
        let inner = self.inner.read().expect("registry lock poisoned");
        inner.tables.get(id).cloned()
    }

    #[must_use]
    pub fn tables(&self) -> Vec<TableHandle> {
        let inner = self.inner.read().expect("registry lock poisoned");
        let mut handles: Vec<TableHandle> = inner.tables.values().cloned().collect();
        handles.sort_by_key(TableHandle::id);
        handles
    }

    pub fn register_token(&self, token: PlayerToken, table: TableId) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.tokens.insert(token, table);
    }

    pub fn unregister_token(&self, token: &PlayerToken) {
        let mut inner = self.inner.write().expect("registry lock poisoned");
        inner.tokens.remove(token);
    }

    /// Resolve a session token to its table's handle.
    #[must_use]
    pub fn table_for_token(&self, token: &PlayerToken) -> Option<TableHandle> {
        let inner = self.inner.read().expect("registry lock poisoned");
        let table_id = inner.tokens.get(token)?;
        inner.tables.get(table_id).cloned()
    }
}
