//! File System Clip Library - 从目录加载 DCA 音效
//!
//! 实现 ClipLibraryPort trait

use async_trait::async_trait;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::application::ports::{ClipLibraryPort, LoadError};
use crate::domain::clip::{decode_frames, Clip, ClipCatalog, ClipName};

/// 默认音效文件扩展名
pub const DEFAULT_CLIP_EXTENSION: &str = "dca";

/// 文件系统音效库
pub struct FsClipLibrary {
    /// 音效根目录（递归遍历）
    root: PathBuf,
    /// 音效文件扩展名（不含点）
    extension: String,
}

impl FsClipLibrary {
    pub fn new(root: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: extension.into(),
        }
    }

    /// 使用默认扩展名 `dca`
    pub fn with_default_extension(root: impl AsRef<Path>) -> Self {
        Self::new(root, DEFAULT_CLIP_EXTENSION)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load_blocking(root: &Path, extension: &str) -> Result<ClipCatalog, LoadError> {
        if !root.is_dir() {
            return Err(LoadError::NotADirectory(root.to_path_buf()));
        }

        let mut builder = ClipCatalog::builder();
        for (path, name) in Self::collect_files(root, extension)? {
            tracing::info!(clip = %name, path = %path.display(), "Loading clip");
            let clip = Self::load_clip(&path, name)?;

            tracing::debug!(
                clip = %clip.name(),
                frames = clip.frame_count(),
                bytes = clip.total_bytes(),
                "Clip loaded"
            );

            if let Some(previous) = builder.insert(clip) {
                tracing::warn!(
                    clip = %previous.name(),
                    path = %path.display(),
                    "Duplicate clip name, replacing earlier entry"
                );
            }
        }

        let catalog = builder.build();
        tracing::info!(
            root = %root.display(),
            clips = catalog.len(),
            "Clip catalog built"
        );
        Ok(catalog)
    }

    /// 递归收集匹配的文件，同一目录内按文件名排序，深度优先
    fn collect_files(root: &Path, extension: &str) -> Result<Vec<(PathBuf, ClipName)>, LoadError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            if let Some(name) = ClipName::from_path(&path, extension) {
                files.push((path, name));
            } else if path.extension() == Some(OsStr::new(extension)) {
                // 扩展名匹配但文件名不是合法 UTF-8
                return Err(LoadError::InvalidName(path));
            }
        }

        Ok(files)
    }

    fn load_clip(path: &Path, name: ClipName) -> Result<Clip, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // file 在离开作用域时关闭，无论解码成功与否
        let frames = decode_frames(BufReader::new(file)).map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Clip::new(name, frames))
    }
}

fn walk_error(root: &Path, err: walkdir::Error) -> LoadError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    LoadError::Io { path, source }
}

#[async_trait]
impl ClipLibraryPort for FsClipLibrary {
    async fn load(&self) -> Result<ClipCatalog, LoadError> {
        let root = self.root.clone();
        let extension = self.extension.clone();

        tokio::task::spawn_blocking(move || Self::load_blocking(&root, &extension))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))?
    }
}
