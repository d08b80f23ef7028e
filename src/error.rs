//! Error types for rjmx-mapper
//!
//! This module defines the error types used throughout the application.

use thiserror::Error;

/// MBean ObjectName 파싱 에러
///
/// 모든 variant는 원본 ObjectName 문자열을 포함합니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MBeanNameError {
    /// ':' 구분자가 없거나 도메인/속성 부분이 비어 있음
    #[error("domain and properties needed in mbean name: {0}")]
    MissingDomainOrProperties(String),

    /// key=value 문법에 맞지 않는 잔여 입력
    #[error("mbean properties must be in the form key=value: {name} (unexpected input at byte {offset})")]
    MalformedProperties { name: String, offset: usize },
}

impl MBeanNameError {
    /// 에러를 일으킨 원본 ObjectName
    pub fn name(&self) -> &str {
        match self {
            MBeanNameError::MissingDomainOrProperties(name) => name,
            MBeanNameError::MalformedProperties { name, .. } => name,
        }
    }
}

/// 요청 빌드 에러
///
/// 어떤 매핑에서든 에러가 나면 배치 전체가 실패합니다. 부분 결과는 없습니다.
#[derive(Error, Debug)]
pub enum BuildError {
    /// 잘못된 MBean ObjectName
    #[error("Malformed mbean name: {0}")]
    MalformedMBeanName(#[from] MBeanNameError),

    /// GET 모드에서 proxy target 사용
    #[error("Proxy requests are only valid when using POST method (mbean: {mbean})")]
    UnsupportedProxyTarget { mbean: String },

    /// POST 요청 본문 직렬화 실패
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Jolokia base URL 파싱 실패
    #[error("Invalid Jolokia URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Request build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;
