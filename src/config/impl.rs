use config::{Config, ConfigError, Environment, File};
use std::path::Path;

use super::AppConfig;

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_base("config")
    }

    /// 从指定的基础文件名加载配置（不含扩展名）
    pub fn load_with_base(base: &str) -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name(base).required(false))
            // 然后根据环境加载特定配置文件
            .add_source(File::with_name(&format!("{base}.{environment}")).required(false))
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("TRACKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("storage.data_dir", std::env::var("TRACKER_DATA_DIR").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 从单个配置文件加载，不读取环境变量
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}
