use serde::Serialize;

use super::{Collection, TypedEntity, expect_typed, require_id, typed_entity};
use crate::{HttpClient, Razorpay, Result};

const PATH: &str = "orders";

typed_entity! {
    /// An order (`"entity": "order"`). Payments are made against orders.
    Order => "order"
}

impl Order {
    /// `POST /orders`
    pub async fn create<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).create(params).await?)
    }

    /// `GET /orders/{id}`
    pub async fn fetch<C: HttpClient + Clone>(razorpay: &Razorpay<C>, id: &str) -> Result<Self> {
        expect_typed(razorpay.dispatcher(PATH).fetch(id).await?)
    }

    /// `GET /orders`
    pub async fn all<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Collection>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).all(params).await?)
    }

    /// `GET /orders/{id}/payments`
    pub async fn payments<C>(&self, razorpay: &Razorpay<C>) -> Result<Collection>
    where
        C: HttpClient + Clone,
    {
        let id = require_id(self, Self::ENTITY)?;
        let path = format!("{id}/payments");
        expect_typed(razorpay.dispatcher(PATH).get(&path, &()).await?)
    }

    /// `PATCH /orders/{id}`
    pub async fn edit<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        expect_typed(razorpay.dispatcher(PATH).patch(&id, params).await?)
    }
}
