use serde::Serialize;

use super::{Collection, TypedEntity, expect_typed, require_id, typed_entity};
use crate::{HttpClient, Razorpay, Result};

const PATH: &str = "customers";

typed_entity! {
    /// A customer (`"entity": "customer"`).
    Customer => "customer"
}

impl Customer {
    /// `POST /customers`
    pub async fn create<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).create(params).await?)
    }

    /// `GET /customers/{id}`
    pub async fn fetch<C: HttpClient + Clone>(razorpay: &Razorpay<C>, id: &str) -> Result<Self> {
        expect_typed(razorpay.dispatcher(PATH).fetch(id).await?)
    }

    /// `GET /customers`
    pub async fn all<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Collection>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).all(params).await?)
    }

    /// `PUT /customers/{id}`. Customers are replaced, not patched.
    pub async fn edit<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        expect_typed(razorpay.dispatcher(PATH).put(&id, params).await?)
    }

    /// Customer email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(serde_json::Value::as_str)
    }
}
