use serde::Serialize;

use super::{Collection, TypedEntity, expect_typed, require_id, typed_entity};
use crate::{HttpClient, Razorpay, Result};

const PATH: &str = "refunds";

typed_entity! {
    /// A refund (`"entity": "refund"`).
    Refund => "refund"
}

impl Refund {
    /// `POST /refunds`
    pub async fn create<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).create(params).await?)
    }

    /// `GET /refunds/{id}`
    pub async fn fetch<C: HttpClient + Clone>(razorpay: &Razorpay<C>, id: &str) -> Result<Self> {
        expect_typed(razorpay.dispatcher(PATH).fetch(id).await?)
    }

    /// `GET /refunds`
    pub async fn all<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Collection>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).all(params).await?)
    }

    /// `PATCH /refunds/{id}`
    pub async fn edit<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        expect_typed(razorpay.dispatcher(PATH).patch(&id, params).await?)
    }

    /// Id of the refunded payment.
    #[must_use]
    pub fn payment_id(&self) -> Option<&str> {
        self.get("payment_id").and_then(serde_json::Value::as_str)
    }
}
