//! JMX 매핑 정의
//!
//! 설정에서 읽은 "무엇을 수집할지" 선언과, Jolokia 응답 값을 출력 필드로
//! 되돌리기 위한 역방향 조회 테이블입니다.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 수집할 MBean과 속성 목록
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JmxMapping {
    /// MBean ObjectName (예: "java.lang:type=Memory")
    pub mbean: String,
    /// 조회할 속성 목록
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Proxy target (POST 전용)
    #[serde(default)]
    pub target: Target,
}

impl JmxMapping {
    /// 새 매핑 생성
    pub fn new(mbean: impl Into<String>) -> Self {
        Self {
            mbean: mbean.into(),
            ..Default::default()
        }
    }

    /// 속성 추가
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Proxy target 설정
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Proxy target URL이 설정되어 있는지 확인
    pub fn has_target(&self) -> bool {
        !self.target.url.is_empty()
    }
}

/// MBean 속성과 출력 필드 매핑
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Jolokia 속성 이름
    pub attr: String,
    /// 출력 필드 경로 (빈 문자열이면 미지정)
    #[serde(default)]
    pub field: String,
    /// 출력 이벤트 그룹 (빈 문자열이면 미지정)
    #[serde(default)]
    pub event: String,
}

impl Attribute {
    /// 새 속성 생성
    pub fn new(attr: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            ..Default::default()
        }
    }

    /// 출력 필드 설정
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// 이벤트 그룹 설정
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = event.into();
        self
    }

    /// Whether an output field is declared. Whitespace-only fields count as absent.
    pub fn has_field(&self) -> bool {
        !self.field.trim().is_empty()
    }
}

/// Jolokia proxy target
///
/// A non-empty `url` turns the request into a proxy request, which only the
/// POST builder can express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// 원격 JMX 서비스 URL (예: "service:jmx:rmi:///jndi/rmi://host:9999/jmxrmi")
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// `AttributeMapping` 키: (정규화된 MBean 이름, 속성 이름)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub mbean: String,
    pub attr: String,
}

impl MappingKey {
    pub fn new(mbean: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            mbean: mbean.into(),
            attr: attr.into(),
        }
    }
}

/// Jolokia 응답 속성 -> 출력 필드 역방향 조회 테이블
///
/// Inserting an existing key replaces the previous attribute, so when two
/// mappings declare the same (mbean, attribute) pair the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMapping {
    entries: HashMap<MappingKey, Attribute>,
}

impl AttributeMapping {
    /// 빈 테이블 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 매핑 등록 (기존 값이 있으면 반환)
    pub fn insert(&mut self, mbean: &str, attribute: Attribute) -> Option<Attribute> {
        let key = MappingKey::new(mbean, attribute.attr.as_str());
        self.entries.insert(key, attribute)
    }

    /// MBean 속성의 매핑 조회
    pub fn get(&self, mbean: &str, attr: &str) -> Option<&Attribute> {
        self.entries.get(&MappingKey::new(mbean, attr))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MappingKey, &Attribute)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AttributeMapping {
    type Item = (&'a MappingKey, &'a Attribute);
    type IntoIter = std::collections::hash_map::Iter<'a, MappingKey, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
