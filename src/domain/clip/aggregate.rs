//! Clip Context - Aggregate Root

use super::{ClipName, Frame};

/// Clip 聚合根
///
/// 不变量:
/// - 帧顺序与磁盘顺序一致
/// - 加载后不可变，只能通过 `Arc<Clip>` 共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    name: ClipName,
    frames: Vec<Frame>,
}

impl Clip {
    pub fn new(name: ClipName, frames: Vec<Frame>) -> Self {
        Self { name, frames }
    }

    pub fn name(&self) -> &ClipName {
        &self.name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 所有帧数据的总字节数（不含长度前缀）
    pub fn total_bytes(&self) -> usize {
        self.frames.iter().map(Frame::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_accessors() {
        let clip = Clip::new(
            ClipName::new("air-horn").unwrap(),
            vec![Frame::new(b"ab".to_vec()), Frame::new(b"cde".to_vec())],
        );

        assert_eq!(clip.name().as_str(), "air-horn");
        assert_eq!(clip.frame_count(), 2);
        assert_eq!(clip.total_bytes(), 5);
        assert_eq!(clip.frame(1).unwrap().as_bytes(), b"cde");
        assert!(clip.frame(2).is_none());
    }
}
