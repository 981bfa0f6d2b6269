//! In-Memory Session Registry Implementation

use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{ActiveSession, PlaybackState, SessionRegistryPort};

/// 内存会话登记表
pub struct InMemorySessionRegistry {
    sessions: DashMap<Uuid, ActiveSession>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistryPort for InMemorySessionRegistry {
    fn register(&self, session: ActiveSession) {
        tracing::debug!(
            session_id = %session.id,
            target = %session.target,
            clip = %session.clip_name,
            "Voice session registered"
        );
        self.sessions.insert(session.id, session);
    }

    fn set_state(&self, id: Uuid, state: PlaybackState) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.state = state;
        }
    }

    fn set_frames_sent(&self, id: Uuid, frames_sent: usize) {
        if let Some(mut session) = self.sessions.get_mut(&id) {
            session.frames_sent = frames_sent;
        }
    }

    fn remove(&self, id: Uuid) -> Option<ActiveSession> {
        self.sessions.remove(&id).map(|(_, session)| {
            tracing::debug!(session_id = %id, "Voice session removed");
            session
        })
    }

    fn get(&self, id: Uuid) -> Option<ActiveSession> {
        self.sessions.get(&id).map(|s| s.clone())
    }

    fn list(&self) -> Vec<ActiveSession> {
        self.sessions.iter().map(|e| e.value().clone()).collect()
    }
}
