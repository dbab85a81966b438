//! Response interpretation.
//!
//! [`interpret`] decides, from the status and the parsed body alone, whether a
//! response is a pass-through payload, an API error, or an entity:
//!
//! 1. arrays and empty bodies are returned untouched
//! 2. an object with an `error` key on a non-200 status becomes an [`ApiError`]
//! 3. any other object is an entity, resolved by its `entity` discriminator
//!
//! A non-200 object without an `error` key goes through rule 3 and usually ends
//! up as the registry's generic entity.

use serde_json::Value;

use crate::{ApiError, Entity, Error, ErrorDetails, Payload, Result, TypeRegistry};

/// Interpret a parsed response body.
///
/// # Errors
///
/// - [`Error::Api`] when the body carries an `error` object and the status is not 200
/// - [`Error::InvalidResponse`] when the body is a non-empty scalar
pub fn interpret<T>(status: u16, body: Value, registry: &TypeRegistry<T>) -> Result<Payload<T>> {
    match body {
        body if is_pass_through(&body) => Ok(Payload::Raw(body)),
        Value::Object(map) => {
            if status != 200
                && let Some(error) = map.get("error")
            {
                return Err(Error::Api(api_error(status, error, registry)));
            }
            Ok(Payload::Entity(registry.resolve(Entity::new(map))))
        }
        other => Err(Error::invalid_response(
            status,
            format!("expected a JSON object or array, got `{other}`"),
        )),
    }
}

fn is_pass_through(body: &Value) -> bool {
    match body {
        Value::Null | Value::Array(_) => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Build the error for an `error` object. Anything without a string `code`
/// cannot be resolved and becomes an unknown error.
fn api_error<T>(status: u16, error: &Value, registry: &TypeRegistry<T>) -> ApiError {
    let Some(code) = error.get("code").and_then(Value::as_str) else {
        return ApiError::malformed(status);
    };

    let details = ErrorDetails {
        code: code.to_string(),
        description: error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or(code)
            .to_string(),
        status,
        field: error
            .get("field")
            .and_then(Value::as_str)
            .map(str::to_string),
    };

    registry.resolve_error(code)(details)
}
