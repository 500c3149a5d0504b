use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub gemini: GeminiConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// 覆盖连接串中的库名
    pub name: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 下载 PDF 的落盘目录
    pub output_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// 环境变量名 -> 配置路径
const ENV_KEYS: &[(&str, &str)] = &[
    ("HOST", "server.host"),
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("DATABASE_NAME", "database.name"),
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("GEMINI_MODEL", "gemini.model"),
    ("OUTPUT_DIR", "storage.output_dir"),
];

impl AppConfig {
    /// 从环境变量加载配置 (先读取 .env)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置，便于测试注入
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("gemini.model", "gemini-1.5-pro")?
            .set_default("storage.output_dir", "output")?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?;

        for (env_key, path) in ENV_KEYS {
            builder = builder.set_override_option(*path, lookup(env_key))?;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
            builder = builder.set_override("cors.allowed_origins", origins)?;
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Message("DATABASE_URL must not be empty".into()));
        }
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::Message("GEMINI_API_KEY must not be empty".into()));
        }
        Ok(())
    }
}
