use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_IMPORT_BATCH_SIZE: usize = 50;
const DEFAULT_IMPORT_MAX_ROWS: usize = 1000;

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("CLASSROOM")
                    .separator("_")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("import.batch_size", std::env::var("IMPORT_BATCH_SIZE").ok())?
            .set_override_option("import.max_rows", std::env::var("IMPORT_MAX_ROWS").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.normalize(num_cpus::get());

        Ok(app_config)
    }

    /// 修正缺省或越界的数值配置
    fn normalize(&mut self, cpu_count: usize) {
        if self.server.workers == 0 {
            self.server.workers = cpu_count.min(self.server.max_workers).max(1);
        }

        let import = &mut self.import;
        if import.batch_size == 0 {
            import.batch_size = DEFAULT_IMPORT_BATCH_SIZE;
        }
        if import.max_rows == 0 {
            import.max_rows = DEFAULT_IMPORT_MAX_ROWS;
        }
        // 一批不超过单次导入上限
        import.batch_size = import.batch_size.min(import.max_rows);
        // 上传文件不超过请求体上限
        if import.max_file_size == 0 || import.max_file_size > self.server.limits.max_payload_size {
            import.max_file_size = self.server.limits.max_payload_size;
        }
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::structs::*;

    fn sample() -> AppConfig {
        AppConfig {
            app: AppSettings {
                system_name: "Classroom".to_string(),
                environment: "development".to_string(),
                log_level: "info".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                unix_socket_path: String::new(),
                workers: 0,
                max_workers: 8,
                timeouts: TimeoutConfig {
                    client_request: 5000,
                    client_disconnect: 1000,
                    keep_alive: 75,
                },
                limits: LimitConfig {
                    max_payload_size: 2048,
                },
            },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                access_token_expiry: 15,
                refresh_token_expiry: 7,
                refresh_token_remember_me_expiry: 30,
            },
            argon2: Argon2Config {
                memory_cost: 19456,
                time_cost: 2,
                parallelism: 1,
            },
            database: DatabaseConfig {
                url: "classroom.db".to_string(),
                pool_size: 8,
                timeout: 10,
            },
            cache: CacheConfig {
                default_ttl: 900,
                memory: MemoryConfig {
                    max_capacity: 100,
                },
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
                allowed_methods: vec!["GET".to_string()],
                allowed_headers: vec!["Authorization".to_string()],
                max_age: 3600,
            },
            import: ImportConfig {
                batch_size: 0,
                max_rows: 0,
                max_file_size: 0,
            },
        }
    }

    #[test]
    fn test_normalize_fills_defaults() {
        let mut config = sample();
        config.normalize(16);

        assert_eq!(config.server.workers, 8);
        assert_eq!(config.import.batch_size, DEFAULT_IMPORT_BATCH_SIZE);
        assert_eq!(config.import.max_rows, DEFAULT_IMPORT_MAX_ROWS);
        assert_eq!(config.import.max_file_size, 2048);
    }

    #[test]
    fn test_normalize_clamps_import_limits() {
        let mut config = sample();
        config.server.workers = 2;
        config.import = ImportConfig {
            batch_size: 500,
            max_rows: 100,
            max_file_size: 1 << 20,
        };
        config.normalize(16);

        assert_eq!(config.server.workers, 2);
        assert_eq!(config.import.batch_size, 100);
        assert_eq!(config.import.max_file_size, 2048);
    }
}
