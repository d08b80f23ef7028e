//! Jolokia JMX 요청 빌드 모듈
//!
//! 설정된 MBean/속성 매핑을 Jolokia read 요청과 응답 매핑 테이블로 변환합니다.
//!
//! # Example
//!
//! ```ignore
//! use rjmx_mapper::collector::{Attribute, JmxMapping, JolokiaHttpClient};
//!
//! let mappings = vec![JmxMapping::new("java.lang:type=Memory")
//!     .with_attribute(Attribute::new("HeapMemoryUsage").with_field("memory.heap_usage"))];
//!
//! let client = JolokiaHttpClient::new("POST");
//! let (requests, mapping) =
//!     client.build_requests_and_mappings("http://localhost:8778/jolokia", &mappings)?;
//! ```

mod client;
mod mapping;
mod mbean;

pub use client::{
    BuildResult, GetRequestBuilder, HttpMethod, HttpRequest, JolokiaHttpClient,
    PostRequestBuilder, RequestBuilder, GET_READ_QUERY, JSON_CONTENT_TYPE,
};
pub use mapping::{Attribute, AttributeMapping, JmxMapping, MappingKey, Target};
pub use mbean::{MBeanName, PropertyTokens};
