//! Per-call request descriptors and URL construction.

use crate::error::SdkError;
use crate::http::config::ClientConfig;

use reqwest::Method;
use std::collections::{BTreeMap, HashMap};

// ─── QueryValue ──────────────────────────────────────────────────────────────

/// A query-string value. A list repeats its key once per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Scalar(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Scalar(v)
    }
}

impl From<&String> for QueryValue {
    fn from(v: &String) -> Self {
        QueryValue::Scalar(v.clone())
    }
}

macro_rules! query_value_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(v: $t) -> Self {
                    QueryValue::Scalar(v.to_string())
                }
            }
        )*
    };
}

query_value_from_display!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<T: ToString> From<Vec<T>> for QueryValue {
    fn from(v: Vec<T>) -> Self {
        QueryValue::List(v.iter().map(ToString::to_string).collect())
    }
}

// ─── RequestDescriptor ───────────────────────────────────────────────────────

/// Everything needed to issue one request, except the base configuration.
///
/// `url` is a path template; `{name}` tokens are filled from `path`.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub path: BTreeMap<String, String>,
    pub query: Vec<(String, Option<QueryValue>)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Endpoint-specific messages for error statuses.
    pub errors: HashMap<u16, String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            path: BTreeMap::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            errors: HashMap::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn path(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter. `None` is recorded but never serialized.
    pub fn query<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn error(mut self, status: u16, message: impl Into<String>) -> Self {
        self.errors.insert(status, message.into());
        self
    }

    /// Full request URL: base URL, resolved path, query string.
    pub fn url(&self, config: &ClientConfig) -> Result<String, SdkError> {
        let path = resolve_path(&self.url, &self.path, |v| config.encode_path(v))?;
        let query = query_string(&self.query);
        if query.is_empty() {
            Ok(format!("{}{}", config.base_url(), path))
        } else {
            Ok(format!("{}{}?{}", config.base_url(), path, query))
        }
    }
}

/// Substitute every `{name}` token in `template` with its encoded value.
///
/// A `{` with no closing `}` is kept literally.
pub fn resolve_path(
    template: &str,
    params: &BTreeMap<String, String>,
    encode: impl Fn(&str) -> String,
) -> Result<String, SdkError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            break;
        };
        let name = &rest[open + 1..open + len];
        let value = params
            .get(name)
            .ok_or_else(|| SdkError::MissingPathParameter(name.to_string()))?;
        out.push_str(&rest[..open]);
        out.push_str(&encode(value));
        rest = &rest[open + len + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Serialize present query entries, in insertion order, without the leading `?`.
pub fn query_string(query: &[(String, Option<QueryValue>)]) -> String {
    let mut pairs = Vec::new();
    for (key, value) in query {
        let key = urlencoding::encode(key);
        match value {
            None => {}
            Some(QueryValue::Scalar(v)) => {
                pairs.push(format!("{}={}", key, urlencoding::encode(v)));
            }
            Some(QueryValue::List(vs)) => {
                for v in vs {
                    pairs.push(format!("{}={}", key, urlencoding::encode(v)));
                }
            }
        }
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::config::encode_path_segment;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_path_substitutes_all_tokens() {
        let path = resolve_path(
            "/api/builds/{group}/history/{name}",
            &params(&[("group", "core"), ("name", "foo-1.0")]),
            encode_path_segment,
        )
        .unwrap();
        assert_eq!(path, "/api/builds/core/history/foo-1.0");
        assert!(!path.contains('{') && !path.contains('}'));
    }

    #[test]
    fn test_resolve_path_missing_binding() {
        let err = resolve_path("/api/builds/history/{name}", &params(&[]), encode_path_segment)
            .unwrap_err();
        match err {
            SdkError::MissingPathParameter(name) => assert_eq!(name, "name"),
            other => panic!("expected MissingPathParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_path_escapes_segment() {
        let path = resolve_path(
            "/api/builds/history/discovery-logs/{name}",
            &params(&[("name", "a/b c")]),
            encode_path_segment,
        )
        .unwrap();
        assert_eq!(path, "/api/builds/history/discovery-logs/a%2Fb%20c");
    }

    #[test]
    fn test_resolve_path_without_tokens_or_unclosed() {
        let p = params(&[]);
        assert_eq!(
            resolve_path("/api/builds/history", &p, encode_path_segment).unwrap(),
            "/api/builds/history"
        );
        assert_eq!(resolve_path("/api/{oops", &p, encode_path_segment).unwrap(), "/api/{oops");
    }

    #[test]
    fn test_query_string_omits_absent_values() {
        let descriptor = RequestDescriptor::get("/api/builds/history")
            .query("gav", Some("org:lib:1.0"))
            .query("page", None::<u32>)
            .query("perPage", Some(20u32))
            .query("state", None::<&str>);
        assert_eq!(query_string(&descriptor.query), "gav=org%3Alib%3A1.0&perPage=20");
    }

    #[test]
    fn test_query_string_keeps_empty_string() {
        let descriptor = RequestDescriptor::get("/x")
            .query("state", Some(""))
            .query("page", Some(0u32));
        assert_eq!(query_string(&descriptor.query), "state=&page=0");
    }

    #[test]
    fn test_query_string_repeats_list_key() {
        let descriptor = RequestDescriptor::get("/x").query("state", Some(vec!["new", "failed"]));
        assert_eq!(query_string(&descriptor.query), "state=new&state=failed");
        assert_eq!(query_string(&[]), "");
    }

    #[test]
    fn test_descriptor_url() {
        let config = ClientConfig::builder("http://console.local/").build().unwrap();
        let descriptor = RequestDescriptor::get("/api/builds/history")
            .query("gav", Some("org:lib:1.0"))
            .query("page", Some(2u32))
            .query("perPage", Some(20u32));
        assert_eq!(
            descriptor.url(&config).unwrap(),
            "http://console.local/api/builds/history?gav=org%3Alib%3A1.0&page=2&perPage=20"
        );

        let bare = RequestDescriptor::get("/api/builds/history").query("gav", None::<&str>);
        assert_eq!(bare.url(&config).unwrap(), "http://console.local/api/builds/history");
    }

    #[test]
    fn test_descriptor_url_uses_configured_encoder() {
        fn keep_slashes(v: &str) -> String {
            v.to_string()
        }
        let config = ClientConfig::builder("http://console.local")
            .encode_path(keep_slashes)
            .build()
            .unwrap();
        let descriptor = RequestDescriptor::get("/logs/{name}").path("name", "a/b");
        assert_eq!(descriptor.url(&config).unwrap(), "http://console.local/logs/a/b");
    }

    #[test]
    fn test_descriptor_error_messages() {
        let descriptor = RequestDescriptor::get("/x").error(404, "Build not found");
        assert_eq!(descriptor.errors.get(&404).map(String::as_str), Some("Build not found"));
        assert_eq!(descriptor.method, Method::GET);
    }
}
