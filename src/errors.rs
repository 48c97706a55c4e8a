use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReelpageError {
    /// 缺少或过期的会话 token
    Auth(String),
    Validation(String),
    NotFound(String),
    /// 传输层失败（连接、超时）
    Network(String),
    /// 后端返回 5xx 或其他非预期状态
    Server(String),
    Serialization(String),
    FileOperation(String),
    Config(String),
}

impl ReelpageError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ReelpageError::Auth(_) => "E001",
            ReelpageError::Validation(_) => "E002",
            ReelpageError::NotFound(_) => "E003",
            ReelpageError::Network(_) => "E004",
            ReelpageError::Server(_) => "E005",
            ReelpageError::Serialization(_) => "E006",
            ReelpageError::FileOperation(_) => "E007",
            ReelpageError::Config(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ReelpageError::Auth(_) => "Authentication Error",
            ReelpageError::Validation(_) => "Validation Error",
            ReelpageError::NotFound(_) => "Resource Not Found",
            ReelpageError::Network(_) => "Network Error",
            ReelpageError::Server(_) => "Server Error",
            ReelpageError::Serialization(_) => "Serialization Error",
            ReelpageError::FileOperation(_) => "File Operation Error",
            ReelpageError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ReelpageError::Auth(msg)
            | ReelpageError::Validation(msg)
            | ReelpageError::NotFound(msg)
            | ReelpageError::Network(msg)
            | ReelpageError::Server(msg)
            | ReelpageError::Serialization(msg)
            | ReelpageError::FileOperation(msg)
            | ReelpageError::Config(msg) => msg,
        }
    }

    /// Auth failures are handled by redirecting to login rather than by a message.
    pub fn is_auth(&self) -> bool {
        matches!(self, ReelpageError::Auth(_))
    }

    /// Text shown to the user at a controller boundary.
    ///
    /// Validation and not-found messages are specific enough to show as-is;
    /// everything else collapses into the caller's generic `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ReelpageError::Validation(msg) | ReelpageError::NotFound(msg) if !msg.is_empty() => {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Message the backend attached to a non-success response, if any.
    ///
    /// Transport and decoding failures never carry one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ReelpageError::Validation(msg)
            | ReelpageError::NotFound(msg)
            | ReelpageError::Server(msg)
                if !msg.is_empty() =>
            {
                Some(msg)
            }
            _ => None,
        }
    }

    /// 格式化为彩色输出
    #[cfg(feature = "cli")]
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        let header = format!(
            "{} {} {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red()
        );
        if self.message().is_empty() {
            header
        } else {
            format!("{}\n  {}", header, self.message().white())
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        if self.message().is_empty() {
            self.error_type().to_string()
        } else {
            format!("{}: {}", self.error_type(), self.message())
        }
    }
}

impl fmt::Display for ReelpageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ReelpageError {}

// 便捷的构造函数
impl ReelpageError {
    pub fn auth<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Auth(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ReelpageError::NotFound(msg.into())
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Network(msg.into())
    }

    pub fn server<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Server(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ReelpageError::FileOperation(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ReelpageError::Config(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for ReelpageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ReelpageError::Serialization(err.to_string())
        } else {
            ReelpageError::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ReelpageError {
    fn from(err: std::io::Error) -> Self {
        ReelpageError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ReelpageError {
    fn from(err: serde_json::Error) -> Self {
        ReelpageError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for ReelpageError {
    fn from(err: url::ParseError) -> Self {
        ReelpageError::Config(format!("Invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ReelpageError>;
