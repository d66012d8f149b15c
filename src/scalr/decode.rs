//! Response decoding
//!
//! The type a caller asks for decides how the body is read:
//! - `()` ignores the body (deletes, actions)
//! - [`RawBody`] keeps the bytes untouched
//! - a [`SingleResourceTarget`] is read from the primary `data` object
//! - a [`CollectionTarget`] gets the `data` array plus `meta.pagination`

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;
use crate::scalr::Pagination;

/// Something a response body can be decoded into
pub trait ResponseTarget: Sized {
    fn from_body(body: &[u8]) -> Result<Self>;
}

/// Marker for types decoded from one JSON:API primary resource.
///
/// Implement through [`single_resource!`](crate::single_resource).
pub trait SingleResourceTarget: DeserializeOwned {}

/// A paginated list destination
///
/// Both setters are required, so a type can never declare items without
/// pagination or the other way round.
pub trait CollectionTarget: Default {
    type Item: DeserializeOwned;

    fn set_items(&mut self, items: Vec<Self::Item>);

    fn set_pagination(&mut self, pagination: Pagination);
}

/// Skip decoding entirely
impl ResponseTarget for () {
    fn from_body(_body: &[u8]) -> Result<Self> {
        Ok(())
    }
}

/// Response bytes, copied through without parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBody(pub Vec<u8>);

impl RawBody {
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl ResponseTarget for RawBody {
    fn from_body(body: &[u8]) -> Result<Self> {
        Ok(RawBody(body.to_vec()))
    }
}

/// One page of a resource collection
#[derive(Debug, Clone)]
pub struct List<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

impl<T: DeserializeOwned> CollectionTarget for List<T> {
    type Item = T;

    fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }
}

impl<T: DeserializeOwned> ResponseTarget for List<T> {
    fn from_body(body: &[u8]) -> Result<Self> {
        decode_collection(body)
    }
}

/// Implement [`SingleResourceTarget`] and [`ResponseTarget`] for resource models
#[macro_export]
macro_rules! single_resource {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::scalr::SingleResourceTarget for $ty {}

            impl $crate::scalr::ResponseTarget for $ty {
                fn from_body(body: &[u8]) -> $crate::Result<Self> {
                    $crate::scalr::decode_single(body)
                }
            }
        )+
    };
}

#[derive(Deserialize)]
struct OneDocument<T> {
    data: T,
}

#[derive(Deserialize)]
struct ManyDocument<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Deserialize, Default)]
struct MetaDocument {
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Deserialize, Default)]
struct Meta {
    #[serde(default)]
    pagination: Option<Pagination>,
}

/// Decode the primary resource of a single-resource document
pub fn decode_single<T: SingleResourceTarget>(body: &[u8]) -> Result<T> {
    let document: OneDocument<T> = serde_json::from_slice(body)?;
    Ok(document.data)
}

/// Decode a collection document: items first, then pagination metadata.
///
/// The target is only built once both reads succeed.
pub fn decode_collection<C: CollectionTarget>(body: &[u8]) -> Result<C> {
    let items: ManyDocument<C::Item> = serde_json::from_slice(body)?;
    let meta: MetaDocument = serde_json::from_slice(body)?;

    let pagination = meta
        .meta
        .and_then(|m| m.pagination)
        .unwrap_or_default();

    let mut target = C::default();
    target.set_items(items.data);
    target.set_pagination(pagination);
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    struct Widget {
        id: String,
        attributes: WidgetAttributes,
    }

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    struct WidgetAttributes {
        name: String,
    }

    crate::single_resource!(Widget);

    fn widgets(n: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..n)
            .map(|i| {
                json!({
                    "id": format!("w-{}", i),
                    "type": "widgets",
                    "attributes": { "name": format!("widget-{}", i) }
                })
            })
            .collect();
        json!({
            "data": data,
            "meta": {
                "pagination": {
                    "current-page": 1,
                    "prev-page": null,
                    "next-page": null,
                    "total-pages": 1,
                    "total-count": n
                }
            }
        })
    }

    #[test]
    fn test_collection_sizes() {
        for n in [0usize, 1, 5] {
            let body = serde_json::to_vec(&widgets(n)).unwrap();
            let list: List<Widget> = List::from_body(&body).unwrap();
            assert_eq!(list.items.len(), n);
            assert_eq!(list.pagination.total_count, n as u32);
        }
    }

    #[test]
    fn test_collection_preserves_order() {
        let body = serde_json::to_vec(&widgets(5)).unwrap();
        let list: List<Widget> = List::from_body(&body).unwrap();
        let ids: Vec<&str> = list.items.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w-0", "w-1", "w-2", "w-3", "w-4"]);
    }

    #[test]
    fn test_collection_without_meta_has_zero_pagination() {
        let body = br#"{"data":[{"id":"w-1","attributes":{"name":"a"}}]}"#;
        let list: List<Widget> = List::from_body(body).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.pagination, Pagination::default());
    }

    #[test]
    fn test_single_resource() {
        let body = br#"{"data":{"id":"w-1","type":"widgets","attributes":{"name":"a"}},"included":[]}"#;
        let widget = Widget::from_body(body).unwrap();
        assert_eq!(widget.id, "w-1");
        assert_eq!(widget.attributes.name, "a");
    }

    #[test]
    fn test_single_target_rejects_collection_body() {
        let body = serde_json::to_vec(&widgets(2)).unwrap();
        assert!(Widget::from_body(&body).is_err());
    }

    #[test]
    fn test_collection_bad_item_is_error() {
        let body = br#"{"data":[{"id":"w-1"}]}"#;
        assert!(List::<Widget>::from_body(body).is_err());
    }

    #[test]
    fn test_unit_and_raw_targets() {
        assert!(<()>::from_body(b"not json at all").is_ok());
        let raw = RawBody::from_body(b"\x00\x01binary").unwrap();
        assert_eq!(raw.into_inner(), b"\x00\x01binary".to_vec());
    }
}
