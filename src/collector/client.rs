//! Jolokia 요청 빌더
//!
//! `JmxMapping` 목록을 Jolokia read 요청(GET URI 또는 POST JSON 본문)과
//! `AttributeMapping`으로 변환합니다. HTTP 호출 자체는 하지 않습니다.

use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

use super::mapping::{Attribute, AttributeMapping, JmxMapping, Target};
use super::mbean::MBeanName;
use crate::error::BuildError;

/// 요청 빌드 결과 타입
pub type BuildResult<T> = Result<T, BuildError>;

/// Query string appended to every GET read URI.
pub const GET_READ_QUERY: &str = "ignoreErrors=true&canonicalNaming=false";

/// Content type of the POST request body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP 메서드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    /// 기본값
    #[default]
    Post,
}

impl HttpMethod {
    /// 설정 문자열 해석
    ///
    /// Only the exact string `"GET"` selects GET. Everything else, including
    /// `""` and lowercase `"get"`, falls back to POST.
    pub fn from_config(method: &str) -> Self {
        if method == "GET" {
            HttpMethod::Get
        } else {
            HttpMethod::Post
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 매핑 목록을 요청 목록으로 컴파일하는 빌더
pub trait RequestBuilder {
    /// 빌더가 생성하는 요청 표현 (GET: URI, POST: JSON 본문)
    type Request;

    /// 이 빌더가 사용하는 HTTP 메서드
    fn method(&self) -> HttpMethod;

    /// 매핑 목록 컴파일
    ///
    /// Any failing mapping aborts the whole batch; no partial list is returned.
    fn compile(
        &self,
        mappings: &[JmxMapping],
    ) -> BuildResult<(Vec<Self::Request>, AttributeMapping)>;
}

/// GET 요청 빌더 - (MBean, 속성) 쌍마다 URI 하나
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetRequestBuilder;

impl GetRequestBuilder {
    /// Read URI 생성
    ///
    /// `/read/<mbean>/<attribute>?ignoreErrors=true&canonicalNaming=false`
    ///
    /// The attribute's sub-field is not part of the URI; the whole attribute is
    /// read and the field is picked out when decoding the response.
    pub fn build_uri(mbean: &str, attribute: &Attribute) -> String {
        format!("/read/{}/{}?{}", mbean, attribute.attr, GET_READ_QUERY)
    }

    /// 모든 매핑의 GET URI와 `AttributeMapping` 생성
    pub fn build_uris(
        &self,
        mappings: &[JmxMapping],
    ) -> BuildResult<(Vec<String>, AttributeMapping)> {
        let mut response_mapping = AttributeMapping::new();
        let mut uris = Vec::new();

        // Jolokia answers wildcard reads with canonical names even when
        // canonicalNaming=false, so every key is built from the canonical form.
        for mapping in mappings {
            let mbean = MBeanName::parse(&mapping.mbean)?;

            if mapping.has_target() {
                return Err(BuildError::UnsupportedProxyTarget {
                    mbean: mapping.mbean.clone(),
                });
            }

            let canonical = mbean.canonicalize(true);
            debug!(mbean = %canonical, attributes = mapping.attributes.len(), "Compiled GET mapping");

            for attribute in &mapping.attributes {
                uris.push(Self::build_uri(&canonical, attribute));
                response_mapping.insert(&canonical, attribute.clone());
            }
        }

        Ok((uris, response_mapping))
    }
}

impl RequestBuilder for GetRequestBuilder {
    type Request = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn compile(&self, mappings: &[JmxMapping]) -> BuildResult<(Vec<String>, AttributeMapping)> {
        self.build_uris(mappings)
    }
}

/// POST 요청 블록
///
/// ```json
/// {
///   "type": "read",
///   "mbean": "java.lang:name=ConcurrentMarkSweep,type=GarbageCollector",
///   "attribute": ["CollectionTime", "CollectionCount"],
///   "config": {"canonicalNaming": true, "ignoreErrors": true},
///   "target": {"url": "service:jmx:rmi:///jndi/rmi://targethost:9999/jmxrmi"}
/// }
/// ```
#[derive(Debug, Serialize)]
struct RequestBlock {
    #[serde(rename = "type")]
    request_type: &'static str,
    mbean: String,
    attribute: Vec<String>,
    config: RequestConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<TargetBlock>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig {
    canonical_naming: bool,
    ignore_errors: bool,
}

#[derive(Debug, Serialize)]
struct TargetBlock {
    url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    password: String,
}

impl From<&Target> for TargetBlock {
    fn from(target: &Target) -> Self {
        Self {
            url: target.url.clone(),
            user: target.user.clone(),
            password: target.password.clone(),
        }
    }
}

/// POST 요청 빌더 - 모든 매핑을 단일 bulk 요청으로
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostRequestBuilder;

impl PostRequestBuilder {
    /// Bulk read 요청 본문과 `AttributeMapping` 생성
    ///
    /// One block per mapping. Names are canonicalized without escaping since
    /// they travel as JSON strings rather than URL path segments.
    pub fn build_body(
        &self,
        mappings: &[JmxMapping],
    ) -> BuildResult<(Vec<u8>, AttributeMapping)> {
        let mut response_mapping = AttributeMapping::new();
        let mut blocks = Vec::with_capacity(mappings.len());

        let config = RequestConfig {
            canonical_naming: true,
            ignore_errors: true,
        };

        for mapping in mappings {
            let mbean = MBeanName::parse(&mapping.mbean)?.canonicalize(false);
            debug!(mbean = %mbean, attributes = mapping.attributes.len(), "Compiled POST mapping");

            let mut attribute = Vec::with_capacity(mapping.attributes.len());
            for attr in &mapping.attributes {
                attribute.push(attr.attr.clone());
                response_mapping.insert(&mbean, attr.clone());
            }

            blocks.push(RequestBlock {
                request_type: "read",
                mbean,
                attribute,
                config,
                target: mapping.has_target().then(|| TargetBlock::from(&mapping.target)),
            });
        }

        let body = serde_json::to_vec(&blocks).map_err(BuildError::Serialization)?;

        Ok((body, response_mapping))
    }
}

impl RequestBuilder for PostRequestBuilder {
    type Request = Vec<u8>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn compile(&self, mappings: &[JmxMapping]) -> BuildResult<(Vec<Vec<u8>>, AttributeMapping)> {
        let (body, mapping) = self.build_body(mappings)?;
        Ok((vec![body], mapping))
    }
}

/// Base URL에 바인딩된 요청 기술자
///
/// Issuing the request is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// POST 본문이 있을 때만 `application/json`
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
    }

    /// 본문을 UTF-8 문자열로 반환
    pub fn body_str(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }
}

/// Jolokia 요청 클라이언트
///
/// Picked once from configuration; each variant wraps the matching builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JolokiaHttpClient {
    Get(GetRequestBuilder),
    Post(PostRequestBuilder),
}

impl Default for JolokiaHttpClient {
    fn default() -> Self {
        JolokiaHttpClient::Post(PostRequestBuilder)
    }
}

impl JolokiaHttpClient {
    /// 설정된 HTTP 메서드로 클라이언트 선택
    ///
    /// `"GET"` (case-sensitive) selects GET; any other value selects POST.
    ///
    /// # Example
    /// ```ignore
    /// let client = JolokiaHttpClient::new("GET");
    /// assert_eq!(client.method(), HttpMethod::Get);
    /// ```
    pub fn new(http_method: &str) -> Self {
        Self::from_method(HttpMethod::from_config(http_method))
    }

    pub fn from_method(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => JolokiaHttpClient::Get(GetRequestBuilder),
            HttpMethod::Post => JolokiaHttpClient::Post(PostRequestBuilder),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            JolokiaHttpClient::Get(builder) => builder.method(),
            JolokiaHttpClient::Post(builder) => builder.method(),
        }
    }

    /// 요청 목록과 `AttributeMapping` 생성
    ///
    /// GET yields one request per (mbean, attribute) pair; POST always yields
    /// exactly one request carrying the whole batch.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or any mapping fails
    /// to compile.
    #[instrument(skip(self, mappings), fields(method = %self.method(), mappings = mappings.len()))]
    pub fn build_requests_and_mappings(
        &self,
        base_url: &str,
        mappings: &[JmxMapping],
    ) -> BuildResult<(Vec<HttpRequest>, AttributeMapping)> {
        let base_url = sanitize_base_url(base_url)?;

        match self {
            JolokiaHttpClient::Get(builder) => {
                let (uris, response_mapping) = builder.build_uris(mappings)?;

                let requests = uris
                    .into_iter()
                    .map(|uri| {
                        let url = format!("{}{}", base_url, uri);
                        debug!(uri = %url, "Jolokia GET request");
                        HttpRequest {
                            method: HttpMethod::Get,
                            url,
                            body: None,
                        }
                    })
                    .collect();

                Ok((requests, response_mapping))
            }
            JolokiaHttpClient::Post(builder) => {
                let (body, response_mapping) = builder.build_body(mappings)?;

                let request = HttpRequest {
                    method: HttpMethod::Post,
                    url: base_url,
                    body: Some(body),
                };
                debug!(body = request.body_str().unwrap_or_default(), "Jolokia request body");

                Ok((vec![request], response_mapping))
            }
        }
    }
}

fn sanitize_base_url(base_url: &str) -> BuildResult<String> {
    url::Url::parse(base_url).map_err(|source| BuildError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    Ok(base_url.trim_end_matches('/').to_string())
}
