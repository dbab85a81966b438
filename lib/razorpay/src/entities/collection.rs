use razorpay_core::{Entity, TypeRegistry};
use serde_json::Value;

use super::{Resource, TypedEntity, typed_entity};
use crate::{Error, Result};

typed_entity! {
    /// A page of resources (`"entity": "collection"`), returned by list endpoints.
    ///
    /// Items are kept as raw JSON until resolved with [`Collection::items`].
    Collection => "collection"
}

impl Collection {
    /// Number of items in this page.
    #[must_use]
    pub fn count(&self) -> Option<u64> {
        self.get("count").and_then(Value::as_u64)
    }

    /// Resolve every item through `registry`, the same way a response body is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if `items` is missing or holds a non-object.
    pub fn items(&self, registry: &TypeRegistry<Resource>) -> Result<Vec<Resource>> {
        let Some(Value::Array(items)) = self.get("items") else {
            return Err(Error::invalid_response(
                200,
                "collection has no `items` array",
            ));
        };

        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Ok(registry.resolve(Entity::from(map.clone()))),
                other => Err(Error::invalid_response(
                    200,
                    format!("collection item is not an object: {other}"),
                )),
            })
            .collect()
    }

    /// Resolve every item and convert it to `T`.
    ///
    /// # Errors
    ///
    /// Fails like [`Collection::items`], or with [`Error::UnexpectedEntity`]
    /// if an item resolves to another type.
    pub fn items_of<T: TypedEntity>(&self, registry: &TypeRegistry<Resource>) -> Result<Vec<T>> {
        self.items(registry)?.into_iter().map(T::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::Payment;
    use crate::registry::default_registry;

    fn collection(value: Value) -> Collection {
        Collection::from(serde_json::from_value::<Entity>(value).expect("object"))
    }

    #[test]
    fn items_resolve_through_registry() {
        let page = collection(json!({
            "entity": "collection",
            "count": 3,
            "items": [
                {"entity": "payment", "id": "pay_1"},
                {"entity": "settlement", "id": "setl_1"},
                {"id": "bare"}
            ]
        }));

        let items = page.items(&default_registry()).expect("items");

        assert_eq!(page.count(), Some(3));
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], Resource::Payment(_)));
        assert_eq!(items[1].kind(), "settlement");
        assert_eq!(items[2].as_entity().id(), Some("bare"));
    }

    #[test]
    fn items_of_converts_to_typed() {
        let page = collection(json!({
            "entity": "collection",
            "items": [{"entity": "payment", "id": "pay_1"}, {"entity": "payment", "id": "pay_2"}]
        }));

        let payments: Vec<Payment> = page.items_of(&default_registry()).expect("payments");

        let ids: Vec<_> = payments.iter().filter_map(|p| p.id()).collect();
        assert_eq!(ids, ["pay_1", "pay_2"]);
    }

    #[test]
    fn items_of_rejects_mixed_pages() {
        let page = collection(json!({
            "entity": "collection",
            "items": [{"entity": "payment"}, {"entity": "refund"}]
        }));

        let registry = default_registry();
        let err = page.items_of::<Payment>(&registry).expect_err("mixed");
        assert!(matches!(err, Error::UnexpectedEntity { .. }), "{err}");
    }

    #[test]
    fn missing_or_invalid_items() {
        let registry = default_registry();

        let err = collection(json!({"entity": "collection"}))
            .items(&registry)
            .expect_err("missing");
        assert!(matches!(err, Error::InvalidResponse { .. }));

        let err = collection(json!({"entity": "collection", "items": [1]}))
            .items(&registry)
            .expect_err("scalar item");
        assert!(matches!(err, Error::InvalidResponse { .. }));
    }
}
