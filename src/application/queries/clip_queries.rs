//! Clip Queries

/// 列出所有音效名称
#[derive(Debug, Clone)]
pub struct ListClips;

/// 获取单个音效详情
#[derive(Debug, Clone)]
pub struct GetClip {
    pub name: String,
}

/// 列出正在播放的会话
#[derive(Debug, Clone)]
pub struct ListSessions;
