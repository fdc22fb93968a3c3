//! In-process stand-in for the burger service, built on wiremock.
//!
//! Register and login keep real state (emails and passwords) so duplicate and
//! credential checks behave like the deployed service. Issued tokens are mapped
//! to their account, so profile updates and deletes act on the token's owner.
//! Other authorized routes only check that the header is present.

use super::constants::*;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Default, Debug)]
struct FakeState {
    passwords: HashMap<String, String>,
    /// Issued access token to the email of the account it belongs to.
    tokens: HashMap<String, String>,
    issued_tokens: u64,
    deleted: HashSet<String>,
    next_order_number: u64,
    orders: Vec<Value>,
}

type SharedState = Arc<Mutex<FakeState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, FakeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn body_json(request: &Request) -> Option<Value> {
    serde_json::from_slice(&request.body).ok()
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers
        .iter()
        .find(|(name, _)| name.as_str().eq_ignore_ascii_case("authorization"))
        .map(|(_, values)| values.last().as_str().to_owned())
}

impl FakeState {
    fn issue_token(&mut self, email: &str) -> String {
        self.issued_tokens += 1;
        let token = format!("Bearer token-{}", self.issued_tokens);
        self.tokens.insert(token.clone(), email.to_owned());
        token
    }
}

fn failure(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "success": false, "message": message }))
}

struct RegisterResponder(SharedState);

impl Respond for RegisterResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = body_json(request).unwrap_or(Value::Null);
        let field = |name: &str| body[name].as_str().unwrap_or_default().to_owned();
        let (email, password, name) = (field("email"), field("password"), field("name"));

        if email.is_empty() || password.is_empty() || name.is_empty() {
            return failure(403, REQUIRED_FIELDS_MISSING);
        }

        let mut state = lock(&self.0);
        if state.passwords.contains_key(&email) {
            return failure(403, USER_ALREADY_EXISTS);
        }
        state.passwords.insert(email.clone(), password);
        let token = state.issue_token(&email);

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "email": email, "name": name },
            "accessToken": token,
            "refreshToken": format!("refresh-{}", state.issued_tokens),
        }))
    }
}

struct LoginResponder(SharedState);

impl Respond for LoginResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = body_json(request).unwrap_or(Value::Null);
        let email = body["email"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();

        let mut state = lock(&self.0);
        if state.deleted.contains(email)
            || state.passwords.get(email).map(String::as_str) != Some(password)
        {
            return failure(401, INCORRECT_CREDENTIALS);
        }
        let token = state.issue_token(email);

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "accessToken": token,
            "refreshToken": format!("refresh-{}", state.issued_tokens),
            "user": { "email": email, "name": "registered" },
        }))
    }
}

struct UpdateUserResponder(SharedState);

impl Respond for UpdateUserResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = body_json(request).unwrap_or(Value::Null);
        let current_email = bearer_token(request)
            .and_then(|token| lock(&self.0).tokens.get(&token).cloned())
            .unwrap_or_default();

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {
                "email": body["email"].as_str().unwrap_or(&current_email),
                "name": body["name"].as_str().unwrap_or("unchanged"),
            },
        }))
    }
}

struct DeleteUserResponder(SharedState);

impl Respond for DeleteUserResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = lock(&self.0);
        let Some(email) = bearer_token(request).and_then(|token| state.tokens.get(&token).cloned())
        else {
            return failure(403, INVALID_TOKEN);
        };
        if !state.deleted.insert(email) {
            return failure(404, USER_NOT_FOUND);
        }

        ResponseTemplate::new(202)
            .set_body_json(json!({ "success": true, "message": "User successfully removed" }))
    }
}

struct CreateOrderResponder {
    state: SharedState,
    authorized: bool,
}

fn is_well_formed_id(id: &str) -> bool {
    id.len() == 24 && id.chars().all(|c| c.is_ascii_hexdigit())
}

impl Respond for CreateOrderResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let ids: Vec<String> = body_json(request)
            .and_then(|body| body.get("ingredients").cloned())
            .and_then(|ingredients| serde_json::from_value(ingredients).ok())
            .unwrap_or_default();

        if ids.is_empty() {
            return failure(400, INGREDIENTS_REQUIRED);
        }
        if !ids.iter().all(|id| is_well_formed_id(id)) {
            return ResponseTemplate::new(500)
                .set_body_string("<!DOCTYPE html><pre>Internal Server Error</pre>");
        }
        if !ids.iter().all(|id| VALID_INGREDIENT_IDS.contains(&id.as_str())) {
            return failure(400, INCORRECT_INGREDIENTS);
        }

        let mut state = lock(&self.state);
        state.next_order_number += 1;
        let number = state.next_order_number;

        if !self.authorized {
            return ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "name": "Флюоресцентный бургер",
                "order": { "number": number },
            }));
        }

        let order = json!({
            "_id": format!("{number:024x}"),
            "ingredients": ids,
            "status": "done",
            "number": number,
        });
        state.orders.push(order.clone());

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "name": "Флюоресцентный бургер",
            "order": order,
        }))
    }
}

struct FetchOrdersResponder(SharedState);

impl Respond for FetchOrdersResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let state = lock(&self.0);
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "orders": state.orders,
            "total": state.orders.len(),
            "totalToday": state.orders.len(),
        }))
    }
}

/// A running fake of the service. Dropping it shuts the server down.
pub struct FakeStellarBurgers {
    pub server: MockServer,
    state: SharedState,
}

impl FakeStellarBurgers {
    pub async fn start() -> Self {
        Self::start_with_delay(Duration::ZERO).await
    }

    /// Every response is held back by `delay`, which lets tests trip client timeouts.
    pub async fn start_with_delay(delay: Duration) -> Self {
        let server = MockServer::start().await;
        let state = SharedState::default();
        let route = |suffix: &str| format!("{API_PREFIX}{suffix}");

        Mock::given(method("POST"))
            .and(path(route("/auth/register")))
            .respond_with(Delayed(RegisterResponder(state.clone()), delay))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(route("/auth/login")))
            .respond_with(Delayed(LoginResponder(state.clone()), delay))
            .mount(&server)
            .await;

        Mock::given(method("PATCH"))
            .and(path(route("/auth/user")))
            .and(header_exists("Authorization"))
            .respond_with(Delayed(UpdateUserResponder(state.clone()), delay))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(route("/auth/user")))
            .and(header_exists("Authorization"))
            .respond_with(Delayed(DeleteUserResponder(state.clone()), delay))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(route("/orders")))
            .and(header_exists("Authorization"))
            .respond_with(Delayed(
                CreateOrderResponder {
                    state: state.clone(),
                    authorized: true,
                },
                delay,
            ))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(route("/orders")))
            .respond_with(Delayed(
                CreateOrderResponder {
                    state: state.clone(),
                    authorized: false,
                },
                delay,
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(route("/orders")))
            .and(header_exists("Authorization"))
            .respond_with(Delayed(FetchOrdersResponder(state.clone()), delay))
            .mount(&server)
            .await;

        // Fallbacks for calls without a token. Mounted last so the authorized
        // mocks above take precedence.
        Mock::given(method("PATCH"))
            .and(path(route("/auth/user")))
            .respond_with(failure(401, SHOULD_BE_AUTHORISED).set_delay(delay))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path(route("/auth/user")))
            .respond_with(failure(401, SHOULD_BE_AUTHORISED).set_delay(delay))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(route("/orders")))
            .respond_with(failure(401, SHOULD_BE_AUTHORISED).set_delay(delay))
            .mount(&server)
            .await;

        Self { server, state }
    }

    /// Base URL including the `/api` prefix, as the harness expects it.
    pub fn base_url(&self) -> String {
        format!("{}{API_PREFIX}", self.server.uri())
    }

    pub fn registered_users(&self) -> usize {
        lock(&self.state).passwords.len()
    }

    /// Distinct accounts deleted. Repeated deletes of one account count once.
    pub fn deleted_users(&self) -> usize {
        lock(&self.state).deleted.len()
    }

    pub fn stored_orders(&self) -> usize {
        lock(&self.state).orders.len()
    }
}

struct Delayed<R>(R, Duration);

impl<R: Respond> Respond for Delayed<R> {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.0.respond(request).set_delay(self.1)
    }
}
