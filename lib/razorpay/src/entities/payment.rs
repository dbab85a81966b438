use serde::Serialize;

use super::{Collection, Refund, TypedEntity, expect_typed, require_id, typed_entity};
use crate::{HttpClient, Razorpay, Result};

const PATH: &str = "payments";

typed_entity! {
    /// A payment (`"entity": "payment"`).
    ///
    /// ```ignore
    /// let payment = Payment::fetch(&razorpay, "pay_29QQoUBi66xm2f").await?;
    /// let payment = payment
    ///     .capture(&razorpay, &json!({"amount": 5000, "currency": "INR"}))
    ///     .await?;
    /// ```
    Payment => "payment"
}

impl Payment {
    /// `GET /payments/{id}`
    pub async fn fetch<C: HttpClient + Clone>(razorpay: &Razorpay<C>, id: &str) -> Result<Self> {
        expect_typed(razorpay.dispatcher(PATH).fetch(id).await?)
    }

    /// `GET /payments`
    pub async fn all<C, P>(razorpay: &Razorpay<C>, params: &P) -> Result<Collection>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        expect_typed(razorpay.dispatcher(PATH).all(params).await?)
    }

    /// `POST /payments/{id}/capture`
    pub async fn capture<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        let path = format!("{id}/capture");
        expect_typed(razorpay.dispatcher(PATH).post(&path, params).await?)
    }

    /// `POST /payments/{id}/refund`
    pub async fn refund<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Refund>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        let path = format!("{id}/refund");
        expect_typed(razorpay.dispatcher(PATH).post(&path, params).await?)
    }

    /// `GET /payments/{id}/refunds`
    pub async fn refunds<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Collection>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        let path = format!("{id}/refunds");
        expect_typed(razorpay.dispatcher(PATH).get(&path, params).await?)
    }

    /// `PATCH /payments/{id}`, typically to update `notes`.
    pub async fn edit<C, P>(&self, razorpay: &Razorpay<C>, params: &P) -> Result<Self>
    where
        C: HttpClient + Clone,
        P: Serialize + ?Sized,
    {
        let id = require_id(self, Self::ENTITY)?;
        expect_typed(razorpay.dispatcher(PATH).patch(&id, params).await?)
    }

    /// Amount in the smallest currency unit.
    #[must_use]
    pub fn amount(&self) -> Option<u64> {
        self.get("amount").and_then(serde_json::Value::as_u64)
    }

    /// Payment status (`created`, `authorized`, `captured`, `refunded`, `failed`).
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(serde_json::Value::as_str)
    }
}
