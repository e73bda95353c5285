//! 存储槽基础设施
//!
//! 整个名录保存在一个命名槽中，槽里是一个 JSON 字符串。后端只负责
//! 读、写、清空这个字符串，不理解其中的内容。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::config::{BackendKind, StorageConfig};

/// 单槽存储后端
pub trait StorageBackend: Send + Sync {
    /// 读取槽内容，从未写入过时返回 `None`
    fn read(&self) -> io::Result<Option<String>>;

    /// 整体覆盖槽内容
    fn write(&self, value: &str) -> io::Result<()>;

    /// 删除槽，槽不存在时也视为成功
    fn clear(&self) -> io::Result<()>;

    /// 用于日志的后端描述
    fn describe(&self) -> String;
}

/// 进程内存后端
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用预置内容创建，便于测试损坏数据等场景
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(value.into())),
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "内存存储锁已中毒"))
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, value: &str) -> io::Result<()> {
        *self.lock()? = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.lock()? = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// 文件后端：一个槽对应 `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 先写临时文件再改名，避免写到一半留下半个 JSON
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &self.path)?;

        debug!("写入存储槽 {} ({} 字节)", self.path.display(), value.len());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// 按配置创建存储后端
pub fn backend_from_config(config: &StorageConfig) -> Box<dyn StorageBackend> {
    match config.backend {
        BackendKind::File => Box::new(FileBackend::new(&config.data_dir, &config.slot_key)),
        BackendKind::Memory => Box::new(MemoryBackend::new()),
    }
}
