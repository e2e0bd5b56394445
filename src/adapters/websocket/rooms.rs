//! Topic registry for flat-scoped message routing.
//!
//! Rooms are keyed by flat ID, so visitor events reach only the devices
//! watching that flat.
//!
//! # Architecture
//!
//! ```text
//! Room: flat A-101     Room: flat B-204
//! ├── client-a         ├── client-d
//! ├── client-b         └── client-e
//! └── client-c
//! ```
//!
//! A connection holds at most one membership: joining a second flat removes
//! the connection from the first. Membership is ephemeral and never survives
//! a process restart; clients re-join after reconnecting.

use std::collections::HashMap;

use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::FlatId;

use super::messages::GateUpdate;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The sole owner of room membership state.
///
/// All mutation goes through `join`/`leave`, so every `members` or broadcast
/// call observes a single consistent view with no eventual-consistency
/// window.
///
/// # Thread Safety
///
/// Uses `RwLock` since broadcasts (reads) vastly outnumber joins/leaves
/// (writes). This allows concurrent broadcasts to different rooms.
pub struct RoomRegistry {
    /// Map of flat_id → broadcast sender for that room.
    rooms: RwLock<HashMap<FlatId, broadcast::Sender<GateUpdate>>>,

    /// Map of client_id → flat_id, the single-membership invariant holder.
    client_flats: RwLock<HashMap<ClientId, FlatId>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomRegistry {
    /// Create a new registry with specified channel capacity.
    ///
    /// # Arguments
    ///
    /// * `channel_capacity` - Buffer size for each room's broadcast channel.
    ///   Clients lagging past the buffer miss the oldest frames, which
    ///   at-most-once delivery permits.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_flats: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a flat's room, replacing any prior membership.
    ///
    /// If the room doesn't exist, it's created on demand. The caller must
    /// drop any receiver obtained from an earlier join; once it does, the
    /// connection receives nothing further from the earlier flat.
    ///
    /// # Returns
    ///
    /// A broadcast receiver carrying all updates published to this flat
    /// from this moment on. No earlier events are replayed.
    pub async fn join(
        &self,
        flat_id: &FlatId,
        client_id: ClientId,
    ) -> broadcast::Receiver<GateUpdate> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(*flat_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });
        let receiver = sender.subscribe();

        // Single-membership invariant: the insert replaces any prior flat.
        let previous = self
            .client_flats
            .write()
            .await
            .insert(client_id, *flat_id);

        // Prune the prior room if this client was its last member.
        if let Some(previous_flat) = previous.filter(|p| p != flat_id) {
            if !self.flat_has_members_locked(&previous_flat).await {
                rooms.remove(&previous_flat);
            }
        }

        receiver
    }

    /// Remove a client from its room.
    ///
    /// No-op if the client holds no membership. Empty rooms are pruned.
    pub async fn leave(&self, client_id: &ClientId) {
        let flat_id = self.client_flats.write().await.remove(client_id);

        if let Some(flat_id) = flat_id {
            if !self.flat_has_members_locked(&flat_id).await {
                self.rooms.write().await.remove(&flat_id);
            }
        }
    }

    /// Broadcast an update to all clients in a flat's room.
    ///
    /// Zero members is a normal outcome of a best-effort relay, not an
    /// error; the return value reports how many receivers the update
    /// reached at the instant of publish.
    pub async fn broadcast_to_flat(&self, flat_id: &FlatId, update: GateUpdate) -> usize {
        let rooms = self.rooms.read().await;

        match rooms.get(flat_id) {
            // send fails only when no receiver exists, which is the same
            // zero-recipient outcome
            Some(sender) => sender.send(update).unwrap_or(0),
            None => 0,
        }
    }

    /// Snapshot of the clients currently subscribed to a flat.
    ///
    /// Unknown flats yield an empty set.
    pub async fn members(&self, flat_id: &FlatId) -> Vec<ClientId> {
        self.client_flats
            .read()
            .await
            .iter()
            .filter(|(_, f)| *f == flat_id)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Count of clients currently subscribed to a flat.
    pub async fn member_count(&self, flat_id: &FlatId) -> usize {
        self.client_flats
            .read()
            .await
            .values()
            .filter(|f| *f == flat_id)
            .count()
    }

    /// All flats with an active room (for monitoring/debugging).
    pub async fn active_flats(&self) -> Vec<FlatId> {
        self.rooms.read().await.keys().copied().collect()
    }

    /// Total count of connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_flats.read().await.len()
    }

    async fn flat_has_members_locked(&self, flat_id: &FlatId) -> bool {
        self.client_flats
            .read()
            .await
            .values()
            .any(|f| f == flat_id)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::messages::GateUpdateKind;
    use crate::domain::foundation::Timestamp;
    use std::sync::Arc;

    fn test_update() -> GateUpdate {
        GateUpdate {
            kind: GateUpdateKind::Created,
            data: serde_json::json!({"visitorName": "Sam"}),
            timestamp: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn join_creates_room_on_demand() {
        let registry = RoomRegistry::with_default_capacity();
        let flat_id = FlatId::new();

        let _rx = registry.join(&flat_id, ClientId::new()).await;

        assert_eq!(registry.active_flats().await, vec![flat_id]);
    }

    #[tokio::test]
    async fn join_returns_receiver_for_broadcasts() {
        let registry = Arc::new(RoomRegistry::with_default_capacity());
        let flat_id = FlatId::new();

        let mut rx = registry.join(&flat_id, ClientId::new()).await;

        let delivered = registry.broadcast_to_flat(&flat_id, test_update()).await;
        assert_eq!(delivered, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, GateUpdateKind::Created);
    }

    #[tokio::test]
    async fn all_clients_in_room_receive_broadcast() {
        let registry = Arc::new(RoomRegistry::with_default_capacity());
        let flat_id = FlatId::new();

        let mut rx1 = registry.join(&flat_id, ClientId::new()).await;
        let mut rx2 = registry.join(&flat_id, ClientId::new()).await;
        let mut rx3 = registry.join(&flat_id, ClientId::new()).await;

        let delivered = registry.broadcast_to_flat(&flat_id, test_update()).await;
        assert_eq!(delivered, 3);

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
        assert!(rx3.recv().await.is_ok());
    }

    #[tokio::test]
    async fn broadcast_reaches_only_the_target_flat() {
        let registry = Arc::new(RoomRegistry::with_default_capacity());
        let flat_a = FlatId::new();
        let flat_b = FlatId::new();

        let mut rx_a = registry.join(&flat_a, ClientId::new()).await;
        let mut rx_b = registry.join(&flat_b, ClientId::new()).await;

        let delivered = registry.broadcast_to_flat(&flat_a, test_update()).await;
        assert_eq!(delivered, 1);

        assert!(rx_a.recv().await.is_ok());
        // The other flat's receiver saw nothing.
        assert!(matches!(
            rx_b.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn rejoining_another_flat_replaces_membership() {
        let registry = RoomRegistry::with_default_capacity();
        let flat_a = FlatId::new();
        let flat_b = FlatId::new();
        let client = ClientId::new();

        let rx_a = registry.join(&flat_a, client.clone()).await;
        assert_eq!(registry.member_count(&flat_a).await, 1);

        // Re-join: the old receiver is dropped as the handler would drop it.
        drop(rx_a);
        let _rx_b = registry.join(&flat_b, client.clone()).await;

        assert_eq!(registry.member_count(&flat_a).await, 0);
        assert_eq!(registry.member_count(&flat_b).await, 1);
        assert!(registry.members(&flat_a).await.is_empty());
        assert_eq!(registry.members(&flat_b).await, vec![client]);
    }

    #[tokio::test]
    async fn rejoining_same_flat_keeps_single_membership() {
        let registry = RoomRegistry::with_default_capacity();
        let flat_id = FlatId::new();
        let client = ClientId::new();

        let _rx1 = registry.join(&flat_id, client.clone()).await;
        let _rx2 = registry.join(&flat_id, client.clone()).await;

        assert_eq!(registry.member_count(&flat_id).await, 1);
        assert_eq!(registry.total_client_count().await, 1);
    }

    #[tokio::test]
    async fn leave_removes_client_from_room() {
        let registry = RoomRegistry::with_default_capacity();
        let flat_id = FlatId::new();
        let client = ClientId::new();

        let _rx = registry.join(&flat_id, client.clone()).await;
        assert_eq!(registry.total_client_count().await, 1);

        registry.leave(&client).await;
        assert_eq!(registry.total_client_count().await, 0);
    }

    #[tokio::test]
    async fn leave_prunes_empty_room() {
        let registry = RoomRegistry::with_default_capacity();
        let flat_id = FlatId::new();
        let client = ClientId::new();

        let _rx = registry.join(&flat_id, client.clone()).await;
        registry.leave(&client).await;

        assert!(registry.active_flats().await.is_empty());
    }

    #[tokio::test]
    async fn leave_without_membership_is_noop() {
        let registry = RoomRegistry::with_default_capacity();
        registry.leave(&ClientId::new()).await;
        assert_eq!(registry.total_client_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_to_unknown_flat_reaches_nobody() {
        let registry = RoomRegistry::with_default_capacity();
        let delivered = registry
            .broadcast_to_flat(&FlatId::new(), test_update())
            .await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn members_of_unknown_flat_is_empty() {
        let registry = RoomRegistry::with_default_capacity();
        assert!(registry.members(&FlatId::new()).await.is_empty());
        assert_eq!(registry.member_count(&FlatId::new()).await, 0);
    }
}
