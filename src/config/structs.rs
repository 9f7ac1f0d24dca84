use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 应用配置（启动时加载一次，之后以值的形式注入各组件）
///
/// - server: 监听地址、端口、worker 数量、可信代理
/// - database: SQLite 文件路径与连接池参数
/// - logging: 日志配置
/// - tracking: 事件上报行为
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：PORT > ENV > TOML 文件 > 默认值
    /// ENV 前缀：PRIVALYTICS，分隔符：__
    /// 示例：PRIVALYTICS__DATABASE__PATH=/var/lib/privalytics.db
    ///
    /// An explicitly requested file must exist; the default `config.toml`
    /// is optional.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        Self::load_from(path, None, std::env::var("PORT").ok())
    }

    /// `env` replaces the process environment when set; a blank `port`
    /// is ignored.
    fn load_from(
        path: Option<&str>,
        env: Option<config::Map<String, String>>,
        port: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let (path, required) = match path {
            Some(p) => (p, true),
            None => (DEFAULT_CONFIG_PATH, false),
        };
        let port = port.filter(|p| !p.trim().is_empty());

        let settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(
                Environment::with_prefix("PRIVALYTICS")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.trusted_proxies")
                    .source(env),
            )
            .set_override_option("server.port", port)?
            .build()?;

        settings.try_deserialize::<AppConfig>()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Peers (IP or CIDR) whose `X-Forwarded-For` header is trusted
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

/// 事件上报配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackingConfig {
    /// Reject events whose `siteId` is not a registered site.
    /// Off by default: unknown ids are stored as-is.
    #[serde(default)]
    pub verify_site: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3002
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_path() -> String {
    "privalytics-api.db".to_string()
}

fn default_max_connections() -> u32 {
    8
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3002);
        assert_eq!(config.database.path, "privalytics-api.db");
        assert!(!config.tracking.verify_site);
        assert!(config.server.trusted_proxies.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 8088

            [tracking]
            verify_site = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.tracking.verify_site);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = AppConfig::generate_sample_config();
        assert!(sample.contains("[server]"));
        assert!(sample.contains("[database]"));
        let parsed: AppConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.server.port, 3002);
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::default().save_to_file(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("privalytics-api.db"));
    }

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn missing_file(dir: &tempfile::TempDir) -> String {
        dir.path().join("absent").to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_port_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = AppConfig::load_from(
            path.to_str(),
            env(&[("PRIVALYTICS__SERVER__PORT", "9100")]),
            Some("8088".to_string()),
        )
        .unwrap();
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn test_load_blank_port_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = missing_file(&dir);

        let config = AppConfig::load_from(Some(file.as_str()), env(&[]), Some(String::new()));
        assert!(config.is_err(), "explicit config path must exist");

        let config = AppConfig::load_from(None, env(&[]), Some("  ".to_string())).unwrap();
        assert_eq!(config.server.port, 3002);
    }

    #[test]
    fn test_load_env_layering() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[database]\npath = \"from-file.db\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(
            path.to_str(),
            env(&[
                ("PRIVALYTICS__DATABASE__PATH", "/var/lib/privalytics.db"),
                ("PRIVALYTICS__SERVER__TRUSTED_PROXIES", "10.0.0.0/8,127.0.0.1"),
                ("PRIVALYTICS__TRACKING__VERIFY_SITE", "true"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path, "/var/lib/privalytics.db");
        assert_eq!(
            config.server.trusted_proxies,
            vec!["10.0.0.0/8".to_string(), "127.0.0.1".to_string()]
        );
        assert!(config.tracking.verify_site);
    }
}
