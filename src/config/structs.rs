use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// Timeouts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,    // connection URL, backend inferred from the scheme
    pub pool_size: u32, // pool size
    pub timeout: u64,   // connect timeout (seconds)
    #[serde(default)]
    pub run_migrations: bool, // create the development schema on startup
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub memory: MemoryConfig,
}

/// In-memory cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

/// Dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tables: SourceTables,
    pub table_page_size: u64, // raw-data preview rows per page
    pub max_table_page_size: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tables: SourceTables::default(),
            table_page_size: 50,
            max_table_page_size: 500,
        }
    }
}

/// Source table names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceTables {
    pub tvet15m: String,
    pub tvet15m_data: String,
    pub tvetsms_data: String,
    pub staff: String,
    pub school_staff: String,
    pub partners: String,
    pub internships: String,
    pub erpl_candidates: String,
}

impl Default for SourceTables {
    fn default() -> Self {
        Self {
            tvet15m: "tvet15m".to_string(),
            tvet15m_data: "tvet15m_data".to_string(),
            tvetsms_data: "tvetsms_data".to_string(),
            staff: "tvet_staff".to_string(),
            school_staff: "school_staff".to_string(),
            partners: "development_partners".to_string(),
            internships: "student_internships_15m".to_string(),
            erpl_candidates: "erpl_candidate".to_string(),
        }
    }
}
