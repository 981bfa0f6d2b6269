//! Clip Catalog - 启动时构建的只读音效目录

use std::collections::HashMap;
use std::sync::Arc;

use super::{Clip, ClipName};

/// 音效目录
///
/// 名称 -> Clip 的只读映射。只能通过 `CatalogBuilder` 构建，
/// 构建完成后不再修改，可在任意数量的并发播放请求间共享。
#[derive(Debug, Clone, Default)]
pub struct ClipCatalog {
    clips: HashMap<ClipName, Arc<Clip>>,
}

impl ClipCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// 按名称查找
    pub fn lookup(&self, name: &str) -> Option<Arc<Clip>> {
        self.clips.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// 所有音效名称，顺序不保证
    pub fn names(&self) -> Vec<String> {
        self.clips.keys().map(|n| n.as_str().to_string()).collect()
    }

    pub fn clips(&self) -> impl Iterator<Item = &Arc<Clip>> {
        self.clips.values()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// 目录构建器
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    clips: HashMap<ClipName, Arc<Clip>>,
}

impl CatalogBuilder {
    /// 插入音效，同名时后插入的覆盖先插入的
    ///
    /// 返回被覆盖的旧条目
    pub fn insert(&mut self, clip: Clip) -> Option<Arc<Clip>> {
        self.clips.insert(clip.name().clone(), Arc::new(clip))
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn build(self) -> ClipCatalog {
        ClipCatalog { clips: self.clips }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clip::Frame;

    fn clip(name: &str, frames: &[&[u8]]) -> Clip {
        Clip::new(
            ClipName::new(name).unwrap(),
            frames.iter().map(|f| Frame::new(f.to_vec())).collect(),
        )
    }

    #[test]
    fn test_lookup_and_names() {
        let mut builder = ClipCatalog::builder();
        builder.insert(clip("air-horn", &[b"a", b"b"]));
        builder.insert(clip("rimshot", &[b"c"]));
        let catalog = builder.build();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("air-horn").unwrap().frame_count(), 2);
        assert!(catalog.lookup("missing").is_none());

        let mut names = catalog.names();
        names.sort();
        assert_eq!(names, vec!["air-horn".to_string(), "rimshot".to_string()]);
    }

    #[test]
    fn test_last_insert_wins() {
        let mut builder = ClipCatalog::builder();
        assert!(builder.insert(clip("horn", &[b"old"])).is_none());
        let replaced = builder.insert(clip("horn", &[b"new", b"er"]));
        assert_eq!(replaced.unwrap().frame_count(), 1);

        let catalog = builder.build();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("horn").unwrap().frame_count(), 2);
    }

    #[test]
    fn test_lookup_shares_entry() {
        let mut builder = ClipCatalog::builder();
        builder.insert(clip("horn", &[b"a"]));
        let catalog = builder.build();

        let a = catalog.lookup("horn").unwrap();
        let b = catalog.lookup("horn").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
