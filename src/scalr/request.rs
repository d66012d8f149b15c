//! Request construction

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request};
use serde::Serialize;
use serde_json::Value;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::jsonapi::{self, Payload};
use crate::scalr::ScalrClient;

/// What goes into a request besides the verb and path
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No payload
    #[default]
    Empty,
    /// Query parameters for GET
    Query(Vec<(String, String)>),
    /// JSON:API document or plain JSON body for POST/PATCH/DELETE
    Json(Value),
    /// Opaque bytes for PUT uploads
    Raw(Vec<u8>),
}

impl RequestBody {
    /// Encode list/filter options as query parameters.
    ///
    /// Field names come from serde (`#[serde(rename = "page[size]")]`), `None`
    /// and empty values are left out, sequences become comma separated
    /// values and nested objects become `outer[inner]` keys.
    pub fn query<T: Serialize + ?Sized>(options: &T) -> Result<Self> {
        Ok(RequestBody::Query(query_pairs(options)?))
    }

    /// Encode a payload as a JSON:API document
    pub fn document<P: Payload>(payload: &P) -> Result<Self> {
        Ok(RequestBody::Json(jsonapi::marshal(payload)?))
    }

    /// Encode several payloads as one JSON:API document
    pub fn documents<P: Payload>(payloads: &[P]) -> Result<Self> {
        Ok(RequestBody::Json(jsonapi::marshal_many(payloads)?))
    }

    /// Plain JSON body for endpoints that do not take JSON:API documents
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        RequestBody::Raw(bytes.into())
    }
}

/// Query parameter pairs for `options`, see [`RequestBody::query`]
pub(crate) fn query_pairs<T: Serialize + ?Sized>(options: &T) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    match serde_json::to_value(options)? {
        Value::Object(map) => {
            for (key, value) in map {
                push_query_pairs(&mut pairs, key, value);
            }
        }
        Value::Null => {}
        _ => return Err(ScalrError::InvalidValue("query options")),
    }
    Ok(pairs)
}

fn push_query_pairs(pairs: &mut Vec<(String, String)>, key: String, value: Value) {
    match value {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        Value::String(s) => pairs.push((key, s)),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Array(items) => {
            let joined: Vec<String> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            if !joined.is_empty() {
                pairs.push((key, joined.join(",")));
            }
        }
        Value::Object(map) => {
            for (inner, value) in map {
                push_query_pairs(pairs, format!("{}[{}]", key, inner), value);
            }
        }
    }
}

/// Replace every key of `source` in `target`, keeping multi-valued headers
fn merge_headers(target: &mut HeaderMap, source: &HeaderMap) {
    for key in source.keys() {
        target.remove(key);
    }
    for (key, value) in source.iter() {
        target.append(key.clone(), value.clone());
    }
}

impl ScalrClient {
    /// Build a request for `path` relative to the API base URL.
    ///
    /// GET takes [`RequestBody::Query`], POST/PATCH/DELETE take
    /// [`RequestBody::Json`], and PUT is the raw upload verb taking
    /// [`RequestBody::Raw`]. Nothing is sent.
    pub fn new_request(&self, method: Method, path: &str, body: RequestBody) -> Result<Request> {
        self.new_request_with_headers(method, path, body, &HeaderMap::new())
    }

    /// Like [`new_request`](Self::new_request), with headers that win over
    /// everything else.
    ///
    /// Client default headers go in first; the bearer token and media types
    /// always replace them.
    pub fn new_request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        extra_headers: &HeaderMap,
    ) -> Result<Request> {
        let mut url = self.base_url().join(path)?;

        let mut headers = self.headers();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .map_err(|_| ScalrError::Config("API token contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let media_type = HeaderValue::from_static(api::MEDIA_TYPE);
        let payload = match method {
            Method::GET => {
                headers.insert(ACCEPT, media_type);
                match body {
                    RequestBody::Empty => {}
                    RequestBody::Query(pairs) => {
                        if !pairs.is_empty() {
                            url.query_pairs_mut().extend_pairs(pairs);
                        }
                    }
                    _ => return Err(ScalrError::InvalidValue("GET request body")),
                }
                None
            }
            Method::POST | Method::PATCH | Method::DELETE => {
                headers.insert(ACCEPT, media_type.clone());
                headers.insert(CONTENT_TYPE, media_type);
                match body {
                    RequestBody::Empty => None,
                    RequestBody::Json(value) => Some(serde_json::to_vec(&value)?),
                    _ => return Err(ScalrError::InvalidValue("request body")),
                }
            }
            Method::PUT => {
                headers.insert(ACCEPT, HeaderValue::from_static(api::PLAIN_JSON));
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(api::OCTET_STREAM));
                match body {
                    RequestBody::Empty => None,
                    RequestBody::Raw(bytes) => Some(bytes),
                    _ => return Err(ScalrError::InvalidValue("upload body")),
                }
            }
            _ => return Err(ScalrError::InvalidValue("HTTP method")),
        };

        merge_headers(&mut headers, extra_headers);

        debug!("Built {} request for {}", method, url);

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(bytes) = payload {
            *request.body_mut() = Some(bytes.into());
        }
        Ok(request)
    }
}
