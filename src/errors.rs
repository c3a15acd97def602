//! Unified error handling.
//!
//! Error variants are generated by a macro, each carrying a code and a type name.

use std::fmt;

/// Generates the error enum
///
/// Produces:
/// - the enum definition
/// - `code()` - the error code
/// - `error_type()` - the error type name
/// - `message()` - the error detail
/// - snake_case convenience constructors
macro_rules! define_dashboard_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum DashboardError {
            $($variant(String),)*
        }

        impl DashboardError {
            /// Error code
            pub fn code(&self) -> &'static str {
                match self {
                    $(DashboardError::$variant(_) => $code,)*
                }
            }

            /// Error type name
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(DashboardError::$variant(_) => $type_name,)*
                }
            }

            /// Error detail
            pub fn message(&self) -> &str {
                match self {
                    $(DashboardError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl DashboardError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        DashboardError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_dashboard_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    DataLoad("E011", "Data Load Error"),
    Export("E012", "Export Error"),
}

impl DashboardError {
    /// Colored output for development terminals
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// Compact output
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for DashboardError {}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(err: sea_orm::DbErr) -> Self {
        DashboardError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for DashboardError {
    fn from(err: chrono::ParseError) -> Self {
        DashboardError::DateParse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DashboardError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DashboardError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
