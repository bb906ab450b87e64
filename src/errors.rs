//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称，并统一映射为 gRPC 状态码。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_grades_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum GradesError {
            $($variant(String),)*
        }

        impl GradesError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradesError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradesError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(GradesError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl GradesError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradesError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_grades_errors! {
    InvalidArgument("E001", "Invalid Argument"),
    NotFound("E002", "Resource Not Found"),
    AlreadyExists("E003", "Resource Already Exists"),
    Unauthenticated("E004", "Authentication Error"),
    Cancelled("E005", "Operation Cancelled"),
    DeadlineExceeded("E006", "Deadline Exceeded"),
    DatabaseConfig("E007", "Database Configuration Error"),
    DatabaseConnection("E008", "Database Connection Error"),
    DatabaseOperation("E009", "Database Operation Error"),
    Configuration("E010", "Configuration Error"),
    Server("E011", "Server Error"),
}

/// 返回给调用方的内部错误信息，不包含存储引擎细节
pub const INTERNAL_ERROR_MESSAGE: &str = "internal storage error";

impl GradesError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为调用方可见的错误（其余错误统一按 internal 处理）
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            GradesError::InvalidArgument(_)
                | GradesError::NotFound(_)
                | GradesError::AlreadyExists(_)
                | GradesError::Unauthenticated(_)
                | GradesError::Cancelled(_)
                | GradesError::DeadlineExceeded(_)
        )
    }
}

impl fmt::Display for GradesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradesError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GradesError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradesError::DatabaseOperation(err.to_string())
    }
}

impl From<config::ConfigError> for GradesError {
    fn from(err: config::ConfigError) -> Self {
        GradesError::Configuration(err.to_string())
    }
}

impl From<tonic::transport::Error> for GradesError {
    fn from(err: tonic::transport::Error) -> Self {
        GradesError::Server(err.to_string())
    }
}

impl From<std::io::Error> for GradesError {
    fn from(err: std::io::Error) -> Self {
        GradesError::Server(err.to_string())
    }
}

impl From<GradesError> for tonic::Status {
    fn from(err: GradesError) -> Self {
        match err {
            GradesError::InvalidArgument(msg) => tonic::Status::invalid_argument(msg),
            GradesError::NotFound(msg) => tonic::Status::not_found(msg),
            GradesError::AlreadyExists(msg) => tonic::Status::already_exists(msg),
            GradesError::Unauthenticated(msg) => tonic::Status::unauthenticated(msg),
            GradesError::Cancelled(msg) => tonic::Status::cancelled(msg),
            GradesError::DeadlineExceeded(msg) => tonic::Status::deadline_exceeded(msg),
            // 存储与配置错误不向调用方暴露细节
            GradesError::DatabaseConfig(_)
            | GradesError::DatabaseConnection(_)
            | GradesError::DatabaseOperation(_)
            | GradesError::Configuration(_)
            | GradesError::Server(_) => tonic::Status::internal(INTERNAL_ERROR_MESSAGE),
        }
    }
}

pub type Result<T> = std::result::Result<T, GradesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradesError::invalid_argument("test").code(), "E001");
        assert_eq!(GradesError::not_found("test").code(), "E002");
        assert_eq!(GradesError::unauthenticated("test").code(), "E004");
        assert_eq!(GradesError::database_operation("test").code(), "E009");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradesError::database_connection("test").error_type(),
            "Database Connection Error"
        );
        assert_eq!(
            GradesError::invalid_argument("test").error_type(),
            "Invalid Argument"
        );
    }

    #[test]
    fn test_error_message() {
        let err = GradesError::not_found("grade abc not found");
        assert_eq!(err.message(), "grade abc not found");
    }

    #[test]
    fn test_format_simple() {
        let err = GradesError::invalid_argument("student_id is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Invalid Argument"));
        assert!(formatted.contains("student_id is required"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GradesError::invalid_argument("x"), tonic::Code::InvalidArgument),
            (GradesError::not_found("x"), tonic::Code::NotFound),
            (GradesError::already_exists("x"), tonic::Code::AlreadyExists),
            (GradesError::unauthenticated("x"), tonic::Code::Unauthenticated),
            (GradesError::cancelled("x"), tonic::Code::Cancelled),
            (GradesError::deadline_exceeded("x"), tonic::Code::DeadlineExceeded),
            (GradesError::database_operation("x"), tonic::Code::Internal),
            (GradesError::database_connection("x"), tonic::Code::Internal),
        ];

        for (err, code) in cases {
            assert_eq!(tonic::Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_internal_status_hides_storage_detail() {
        let err = GradesError::database_operation("UNIQUE constraint failed: grades.grade_id");
        assert!(!err.is_client_facing());

        let status = tonic::Status::from(err);
        assert_eq!(status.message(), INTERNAL_ERROR_MESSAGE);
        assert!(!status.message().contains("UNIQUE"));
    }
}
