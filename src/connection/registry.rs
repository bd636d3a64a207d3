// src/connection/registry.rs

//! Maps connection ids to their parser state.

use super::session::Connection;
use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;

/// Identifies one accepted connection for the lifetime of the process.
/// Ids are issued in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The table of open connections, owned by the event loop.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    slots: HashMap<ConnectionId, Connection>,
    next_id: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a slot for a freshly accepted connection.
    pub fn open(&mut self, peer: SocketAddr) -> ConnectionId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = ConnectionId(self.next_id);
        self.slots.insert(id, Connection::new(id, peer));
        id
    }

    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.slots.get(&id)
    }

    pub fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.slots.get_mut(&id)
    }

    /// Releases the slot, handing back whatever parser state it held.
    pub fn close(&mut self, id: ConnectionId) -> Option<Connection> {
        self.slots.remove(&id)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.slots.values()
    }
}
