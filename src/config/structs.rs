use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub email: EmailConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
    pub seed_sample_data: bool, // 首次运行时写入演示数据
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "Assignment Tracker".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
            seed_sample_data: false,
        }
    }
}

/// 分区写入失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// 记录日志后继续，内存状态视为权威
    #[default]
    FailSoft,
    /// 将持久化错误返回给调用方
    FailFast,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: String,  // json | memory
    pub data_dir: String, // 分区文件所在目录
    pub write_policy: WritePolicy,
    pub reconcile_counters: bool, // 加载时用已有 ID 校正计数器
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "json".to_string(),
            data_dir: "data".to_string(),
            write_policy: WritePolicy::FailSoft,
            reconcile_counters: true,
        }
    }
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub min_password_length: usize,
    pub argon2: Argon2Config,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            min_password_length: 6,
            argon2: Argon2Config::default(),
        }
    }
}

/// Argon2 参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Config {
    pub memory_cost: u32, // KiB
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// 邮件配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub backend: String, // log | disabled
    pub from: String,
    pub verification_subject: String,
    pub verification_body: String, // {CODE} 会被替换为验证码
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            backend: "log".to_string(),
            from: "noreply@localhost".to_string(),
            verification_subject: "Verify your email".to_string(),
            verification_body: "Your verification code is: {CODE}".to_string(),
        }
    }
}
