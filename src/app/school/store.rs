//! 学校记录存储
//!
//! 所有记录以一个 JSON 数组保存在单个存储槽中，最新添加的记录排在最前。
//! 每个操作都是对整个数组的 读取-修改-写回。

use std::io;
use std::sync::{Mutex, MutexGuard};

use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, info};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::model::{NewSchool, School, SchoolUpdate};
use crate::infrastructure::storage::StorageBackend;

/// 存储错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("存储访问失败: {0}")]
    Io(#[from] io::Error),
    #[error("存储数据已损坏: {0}")]
    Corrupted(String),
    #[error("序列化失败: {0}")]
    Serialize(String),
    #[error("字段校验失败: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("存储锁已中毒")]
    LockPoisoned,
}

/// 存储槽的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// 从未写入或已清空
    Empty,
    /// 可以正常解析
    Ok,
    /// 内容无法解析
    Corrupted,
}

pub struct SchoolStore {
    backend: Box<dyn StorageBackend>,
    /// 串行化 读取-修改-写回
    write_lock: Mutex<()>,
}

/// 当前时间，毫秒精度的 RFC 3339 UTC 字符串，可按字典序排序
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl SchoolStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        info!("学校存储使用后端: {}", backend.describe());
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// 读取全部记录，损坏的数据按空集合处理
    pub fn list(&self) -> Vec<School> {
        match self.load() {
            Ok(schools) => schools,
            Err(e) => {
                error!("读取学校列表失败，按空列表处理: {}", e);
                Vec::new()
            }
        }
    }

    /// 读取全部记录，区分"从未写入"和"数据损坏"
    pub fn load(&self) -> Result<Vec<School>, StoreError> {
        match self.backend.read()? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::Corrupted(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    /// 检查存储槽状态，给健康检查使用
    pub fn slot_state(&self) -> Result<SlotState, StoreError> {
        match self.backend.read()? {
            None => Ok(SlotState::Empty),
            Some(raw) => match serde_json::from_str::<Vec<School>>(&raw) {
                Ok(_) => Ok(SlotState::Ok),
                Err(_) => Ok(SlotState::Corrupted),
            },
        }
    }

    pub fn get(&self, id: Uuid) -> Option<School> {
        self.list().into_iter().find(|school| school.id == id)
    }

    /// 添加学校，分配 id 和时间戳后放到列表最前面
    pub fn add(&self, fields: NewSchool) -> Result<School, StoreError> {
        fields.validate()?;

        let _guard = self.lock()?;
        let mut schools = self.list();

        let school = School::from_new(fields, Uuid::new_v4(), timestamp_now());
        schools.insert(0, school.clone());
        self.persist(&schools)?;

        info!("添加学校 {} ({})，当前共 {} 所", school.name, school.id, schools.len());
        Ok(school)
    }

    /// 更新学校，记录不存在时返回 `Ok(None)`
    pub fn update(&self, id: Uuid, update: SchoolUpdate) -> Result<Option<School>, StoreError> {
        update.validate()?;

        let _guard = self.lock()?;
        let mut schools = self.list();

        let Some(school) = schools.iter_mut().find(|school| school.id == id) else {
            debug!("更新的学校不存在: {}", id);
            return Ok(None);
        };

        school.merge(update);
        let now = timestamp_now();
        // 时钟回拨时也不能早于创建时间
        school.updated_at = if now < school.created_at {
            school.created_at.clone()
        } else {
            now
        };
        let updated = school.clone();
        self.persist(&schools)?;

        info!("更新学校 {} ({})", updated.name, updated.id);
        Ok(Some(updated))
    }

    /// 删除学校，返回是否确实删除了记录
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let mut schools = self.list();

        let before = schools.len();
        schools.retain(|school| school.id != id);
        if schools.len() == before {
            return Ok(false);
        }

        self.persist(&schools)?;
        info!("删除学校 {}，剩余 {} 所", id, schools.len());
        Ok(true)
    }

    /// 清空存储槽
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        self.backend.clear()?;
        info!("已清空全部学校记录");
        Ok(())
    }

    fn persist(&self, schools: &[School]) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(schools).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.write(&raw)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)
    }
}
