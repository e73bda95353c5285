//! 服务配置
//!
//! 配置按以下顺序查找：环境变量 `SCHOOL_DIRECTORY_CONFIG` 指定的文件、
//! `config.toml`、`./config/config.toml`，都不存在时使用默认值。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "SCHOOL_DIRECTORY_CONFIG";

/// 默认的存储槽名称
pub const DEFAULT_SLOT_KEY: &str = "schools_data";

/// 图片"上传"时替换进表单的固定占位图片
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str =
    "https://images.pexels.com/photos/289740/pexels-photo-289740.jpeg?auto=compress&cs=tinysrgb&w=800";

/// 服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 页面交互配置
    pub ui: UiConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// 单个 JSON 文件
    File,
    /// 进程内存，重启即丢失
    Memory,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: BackendKind,
    /// 文件后端的数据目录
    pub data_dir: PathBuf,
    /// 存储槽名称，文件后端会写入 `<data_dir>/<slot_key>.json`
    pub slot_key: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志文件目录，为空时不写文件
    pub log_path: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// 页面交互配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// 首页自动跳转到列表页的秒数
    pub landing_redirect_seconds: u64,
    /// 提交表单前的人为延迟（毫秒）
    pub submit_delay_ms: u64,
    /// 提交成功后跳转到列表页的延迟（毫秒）
    pub success_redirect_ms: u64,
    pub placeholder_image_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_dir: PathBuf::from("./data"),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            log_path: None,
            file_prefix: "school-directory".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            landing_redirect_seconds: 4,
            submit_delay_ms: 1000,
            success_redirect_ms: 1500,
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        let key = &self.storage.slot_key;
        if key.is_empty() {
            return Err(ConfigError::Validation("存储槽名称不能为空".to_string()));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "存储槽名称只能包含字母、数字、'_' 和 '-': {}",
                key
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        if self.ui.placeholder_image_url.is_empty() {
            return Err(ConfigError::Validation("占位图片地址不能为空".to_string()));
        }

        Ok(())
    }

    /// 监听地址，形如 `127.0.0.1:3000`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http.bind_address, self.http.port)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载并验证配置
///
/// 此时日志系统还没有初始化，所以直接打印到控制台
pub fn load_config() -> Result<Config, ConfigError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        println!("从环境变量指定的配置文件加载: {}", path);
        let config = Config::load_from_file(&path)?;
        config.validate()?;
        return Ok(config);
    }

    let config_paths = ["config.toml", "./config/config.toml"];

    for path in &config_paths {
        if Path::new(path).exists() {
            println!("从配置文件加载: {}", path);
            let config = Config::load_from_file(path)?;
            config.validate()?;
            return Ok(config);
        }
    }

    println!("未找到配置文件，使用默认配置");
    Ok(Config::default())
}
