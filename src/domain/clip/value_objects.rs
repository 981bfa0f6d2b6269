//! Clip Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 音频帧
///
/// 一个不透明的压缩音频单元（通常是一个 Opus 包），除长度外不解析内部结构。
/// 长度为 0 的帧合法。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame(Vec<u8>);

impl Frame {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self(payload.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Frame {
    fn from(payload: Vec<u8>) -> Self {
        Self(payload)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 音效名称
///
/// 由源文件名去掉扩展名得到，例如 `air-horn.dca` -> `air-horn`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClipName(String);

impl ClipName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.is_empty() {
            return Err("音效名称不能为空");
        }
        Ok(Self(name))
    }

    /// 从文件路径推导名称
    ///
    /// 只有文件名以 `.{extension}` 结尾时返回 Some
    pub fn from_path(path: &Path, extension: &str) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
        Self::new(stem).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ClipName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for ClipName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_clip_name_from_path() {
        let path = PathBuf::from("sounds/horns/air-horn.dca");
        let name = ClipName::from_path(&path, "dca").unwrap();
        assert_eq!(name.as_str(), "air-horn");
    }

    #[test]
    fn test_clip_name_keeps_inner_dots() {
        let path = PathBuf::from("sounds/ba.dum.tss.dca");
        let name = ClipName::from_path(&path, "dca").unwrap();
        assert_eq!(name.as_str(), "ba.dum.tss");
    }

    #[test]
    fn test_clip_name_rejects_other_extensions() {
        assert!(ClipName::from_path(&PathBuf::from("sounds/readme.txt"), "dca").is_none());
        assert!(ClipName::from_path(&PathBuf::from("sounds/notdca"), "dca").is_none());
        // 只有扩展名，没有名称
        assert!(ClipName::from_path(&PathBuf::from("sounds/.dca"), "dca").is_none());
    }

    #[test]
    fn test_empty_frame_is_valid() {
        let frame = Frame::new(Vec::new());
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
    }
}
