//! Clip Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::PlaybackError;
use crate::application::ports::{ActiveSession, SessionRegistryPort};
use crate::application::queries::{GetClip, ListClips, ListSessions};
use crate::domain::clip::{Clip, ClipCatalog};

// ============================================================================
// Response DTOs
// ============================================================================

/// 音效详情
#[derive(Debug, Clone, Serialize)]
pub struct ClipInfo {
    pub name: String,
    pub frame_count: usize,
    pub total_bytes: usize,
}

impl From<&Clip> for ClipInfo {
    fn from(clip: &Clip) -> Self {
        Self {
            name: clip.name().to_string(),
            frame_count: clip.frame_count(),
            total_bytes: clip.total_bytes(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListClips Handler
pub struct ListClipsHandler {
    catalog: Arc<ClipCatalog>,
}

impl ListClipsHandler {
    pub fn new(catalog: Arc<ClipCatalog>) -> Self {
        Self { catalog }
    }

    /// 返回排序后的名称，便于展示
    pub fn handle(&self, _query: ListClips) -> Vec<String> {
        let mut names = self.catalog.names();
        names.sort();
        names
    }
}

/// GetClip Handler
pub struct GetClipHandler {
    catalog: Arc<ClipCatalog>,
}

impl GetClipHandler {
    pub fn new(catalog: Arc<ClipCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetClip) -> Result<ClipInfo, PlaybackError> {
        self.catalog
            .lookup(&query.name)
            .map(|clip| ClipInfo::from(clip.as_ref()))
            .ok_or_else(|| PlaybackError::not_found(query.name))
    }
}

/// ListSessions Handler
pub struct ListSessionsHandler {
    session_registry: Arc<dyn SessionRegistryPort>,
}

impl ListSessionsHandler {
    pub fn new(session_registry: Arc<dyn SessionRegistryPort>) -> Self {
        Self { session_registry }
    }

    pub fn handle(&self, _query: ListSessions) -> Vec<ActiveSession> {
        let mut sessions = self.session_registry.list();
        sessions.sort_by_key(|s| s.started_at);
        sessions
    }
}
