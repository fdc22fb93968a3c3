//! Payload builders for each endpoint. All of them are pure.

use crate::http::RequestBody;
use model::order::{CreateOrderRequest, OrderRequest};
use model::user::{LoginRequest, RegisterRequest, UserUpdate};
use serde_json::json;

/// Registration payload.
///
/// A missing email is sent as `""` with the key still present. This mirrors
/// what a client form submits when the field is left blank, and is how the
/// missing-field scenario reaches the service's own validation instead of
/// failing locally.
pub fn register_body(email: Option<&str>, password: &str, name: &str) -> RequestBody {
    RequestBody::Json(json!(RegisterRequest {
        email: email.unwrap_or_default(),
        password,
        name,
    }))
}

pub fn login_body(email: &str, password: &str) -> RequestBody {
    RequestBody::Json(json!(LoginRequest { email, password }))
}

pub fn update_user_body(update: &UserUpdate) -> RequestBody {
    RequestBody::Json(json!(update))
}

/// `{"ingredients": [...]}`. An empty order still produces the key with an
/// empty list; use [`order_without_body`] to send nothing at all.
pub fn order_body(order: &OrderRequest) -> RequestBody {
    RequestBody::Json(json!(CreateOrderRequest {
        ingredients: &order.ingredient_ids,
    }))
}

pub fn order_without_body() -> RequestBody {
    RequestBody::Empty
}
