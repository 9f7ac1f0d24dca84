use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

#[derive(Debug, Clone)]
pub enum PrivalyticsError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    Unauthorized(String),
    NotFound(String),
}

impl PrivalyticsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PrivalyticsError::DatabaseConfig(_) => "E001",
            PrivalyticsError::DatabaseConnection(_) => "E002",
            PrivalyticsError::DatabaseOperation(_) => "E003",
            PrivalyticsError::Validation(_) => "E004",
            PrivalyticsError::Unauthorized(_) => "E005",
            PrivalyticsError::NotFound(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PrivalyticsError::DatabaseConfig(_) => "Database Configuration Error",
            PrivalyticsError::DatabaseConnection(_) => "Database Connection Error",
            PrivalyticsError::DatabaseOperation(_) => "Database Operation Error",
            PrivalyticsError::Validation(_) => "Validation Error",
            PrivalyticsError::Unauthorized(_) => "Unauthorized",
            PrivalyticsError::NotFound(_) => "Resource Not Found",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PrivalyticsError::DatabaseConfig(msg)
            | PrivalyticsError::DatabaseConnection(msg)
            | PrivalyticsError::DatabaseOperation(msg)
            | PrivalyticsError::Validation(msg)
            | PrivalyticsError::Unauthorized(msg)
            | PrivalyticsError::NotFound(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            PrivalyticsError::Validation(_) => StatusCode::BAD_REQUEST,
            PrivalyticsError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PrivalyticsError::NotFound(_) => StatusCode::NOT_FOUND,
            PrivalyticsError::DatabaseConfig(_)
            | PrivalyticsError::DatabaseConnection(_)
            | PrivalyticsError::DatabaseOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端输出）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PrivalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PrivalyticsError {}

// 便捷的构造函数
impl PrivalyticsError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::Validation(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PrivalyticsError::NotFound(msg.into())
    }
}

impl From<sea_orm::DbErr> for PrivalyticsError {
    fn from(err: sea_orm::DbErr) -> Self {
        PrivalyticsError::DatabaseOperation(err.to_string())
    }
}

/// Flat error body returned by every endpoint: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

impl ResponseError for PrivalyticsError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!("{} [{}]: {}", self.error_type(), self.code(), self.message());
        }
        HttpResponse::build(status).json(ErrorBody {
            error: self.message(),
        })
    }
}

pub type Result<T> = std::result::Result<T, PrivalyticsError>;
