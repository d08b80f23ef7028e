//! MBean ObjectName 파서
//!
//! `domain:key=value,...` 형태의 ObjectName을 도메인과 속성 집합으로 파싱하고,
//! Jolokia가 반환하는 이름과 비교할 수 있도록 정규화(canonical) 문자열을 생성합니다.
//!
//! See <https://docs.oracle.com/javase/8/docs/api/javax/management/ObjectName.html#getCanonicalName-->

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::MBeanNameError;

/// Characters that terminate a property key.
const KEY_TERMINATORS: &[char] = &[',', '=', ':', '*', '?'];

/// Characters that terminate an unquoted property value.
const VALUE_TERMINATORS: &[char] = &[',', '=', ':', '"'];

/// Jolokia escapes these characters with a leading `!` in its own names.
static ESCAPE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[".!/]"#).expect("invalid escape regex"));

/// 파싱된 MBean ObjectName
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MBeanName {
    domain: String,
    properties: HashMap<String, String>,
}

impl MBeanName {
    /// ObjectName 문자열 파싱
    ///
    /// Quoted values keep their quotes and may contain commas:
    /// `java.lang:name="foo,bar",type=Runtime` yields `name => "\"foo,bar\""`.
    /// A quoted value extends to the last `"` on the line.
    ///
    /// Wildcards (`*`, `?`) are accepted in values but not in keys.
    /// When a key is repeated, the last value wins.
    pub fn parse(raw: &str) -> Result<Self, MBeanNameError> {
        let (domain, property_list) = match raw.split_once(':') {
            Some((domain, props)) if !domain.is_empty() && !props.is_empty() => (domain, props),
            _ => return Err(MBeanNameError::MissingDomainOrProperties(raw.to_string())),
        };

        let mut properties = HashMap::new();
        for token in PropertyTokens::new(property_list) {
            let (key, value) = token.map_err(|offset| MBeanNameError::MalformedProperties {
                name: raw.to_string(),
                offset: domain.len() + 1 + offset,
            })?;
            properties.insert(key.to_string(), value.to_string());
        }

        Ok(Self {
            domain: domain.to_string(),
            properties,
        })
    }

    /// 도메인 (예: "java.lang")
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// 속성 맵 (예: {"type": "Memory"})
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// 단일 속성 값 조회
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// 정규화된 ObjectName 문자열 생성
    ///
    /// `key=value` tokens are sorted lexicographically so the output does not
    /// depend on property order. With `escape`, every `"`, `.`, `!` and `/` in
    /// a value is prefixed with `!`, which is how Jolokia spells names in read
    /// URLs.
    pub fn canonicalize(&self, escape: bool) -> String {
        let mut tokens: Vec<String> = self
            .properties
            .iter()
            .map(|(key, value)| {
                let value = if escape {
                    ESCAPE_PATTERN.replace_all(value, "!$0")
                } else {
                    Cow::Borrowed(value.as_str())
                };
                format!("{}={}", key, value)
            })
            .collect();
        tokens.sort();

        format!("{}:{}", self.domain, tokens.join(","))
    }
}

impl FromStr for MBeanName {
    type Err = MBeanNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MBeanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonicalize(false))
    }
}

/// `key=value[,key=value...]` 토크나이저
///
/// Yields one `(key, value)` pair per property. Anything the grammar does not
/// cover is reported as `Err(offset)`, the byte offset of the first unmatched
/// character, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct PropertyTokens<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> PropertyTokens<'a> {
    /// 새 토크나이저 생성
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    fn next_token(&mut self) -> Result<(&'a str, &'a str), usize> {
        let rest = &self.input[self.pos..];

        let key_len = rest.find(KEY_TERMINATORS).unwrap_or(rest.len());
        if key_len == 0 {
            return Err(self.pos);
        }
        if !rest[key_len..].starts_with('=') {
            return Err(self.pos + key_len);
        }
        let key = &rest[..key_len];

        let value_start = self.pos + key_len + 1;
        let rest = &self.input[value_start..];
        let value_len = if rest.starts_with('"') {
            let line = match rest.find('\n') {
                Some(end) => &rest[..end],
                None => rest,
            };
            match line.rfind('"') {
                Some(close) if close > 0 => close + 1,
                _ => return Err(value_start),
            }
        } else {
            rest.find(VALUE_TERMINATORS).unwrap_or(rest.len())
        };
        if value_len == 0 {
            return Err(value_start);
        }
        let value = &rest[..value_len];

        let end = value_start + value_len;
        match self.input[end..].chars().next() {
            None => self.finished = true,
            Some(',') => self.pos = end + 1,
            Some(_) => return Err(end),
        }

        Ok((key, value))
    }
}

impl<'a> Iterator for PropertyTokens<'a> {
    type Item = Result<(&'a str, &'a str), usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is_err() {
            self.finished = true;
        }
        Some(token)
    }
}
