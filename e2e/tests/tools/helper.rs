use chrono::{Local, Timelike};
use model::order::{OrderRequest, OrderResponse, OrdersResponse};
use stellar_burgers_contract::assertions::{
    assert_json_field, assert_json_field_non_empty, assert_status, AssertionFailure,
};
use stellar_burgers_contract::http::{ApiRequest, Endpoint, Transport};
use stellar_burgers_contract::requests::order_body;
use stellar_burgers_contract::result::error::Result;
use stellar_burgers_contract::runner::ScenarioOutcome;
use serde_json::json;

pub const TEST_OUTPUT_DELIMITER_LINE: &str = "====================================================";

pub fn print_test_output_line_begins() {
    println!("\n{}", TEST_OUTPUT_DELIMITER_LINE);
}
pub fn print_test_output_line_ends() {
    println!("{}", TEST_OUTPUT_DELIMITER_LINE);
}

pub fn print_with_time(message: String) {
    let current_time = Local::now();
    let hour = current_time.hour();
    let minute = current_time.minute();
    let second = current_time.second();
    let millisecond = current_time.timestamp_subsec_millis();
    println!(
        "[{:02}:{:02}:{:02}.{:03}] {}",
        hour, minute, second, millisecond, message
    );
}

pub fn print_outcome(outcome: &ScenarioOutcome) {
    print_with_time(format!(
        "[=] [{}] {} - {:?} (status {:?}, {} ms)",
        outcome.area, outcome.name, outcome.verdict, outcome.status, outcome.duration_ms
    ));
    for note in &outcome.notes {
        print_with_time(format!("    note: {note}"));
    }
    for failure in &outcome.assertion_failures {
        print_with_time(format!("    assertion: {failure}"));
    }
    if let Some(error) = &outcome.network_error {
        print_with_time(format!("    network: {error}"));
    }
    for error in &outcome.fixture_errors {
        print_with_time(format!("    fixture: {error}"));
    }
}

/// Places an order for `token` and checks that it is listed among the user's
/// orders. Returns the order number.
pub async fn order_round_trip<T: Transport>(
    transport: &T,
    token: &str,
    ingredient_ids: &[&str],
) -> Result<u64> {
    let created = transport
        .send(
            ApiRequest::new(Endpoint::CreateOrder)
                .with_token(Some(token))
                .with_body(order_body(&OrderRequest::new(ingredient_ids.iter().copied()))),
        )
        .await?;
    assert_status(&created, 200)?;
    assert_json_field(&created, "success", &json!(true))?;
    assert_json_field_non_empty(&created, "order._id")?;
    let created: OrderResponse = serde_json::from_str(created.raw_body())
        .map_err(|e| AssertionFailure::new("<body>", "order response", e.to_string()))?;
    let order_id = created.order.id.unwrap_or_default();
    print_with_time(format!(
        "[=] [Orders] - Created order {} ({order_id})",
        created.order.number
    ));

    let fetched = transport
        .send(ApiRequest::new(Endpoint::FetchOrders).with_token(Some(token)))
        .await?;
    assert_status(&fetched, 200)?;
    let fetched: OrdersResponse = serde_json::from_str(fetched.raw_body())
        .map_err(|e| AssertionFailure::new("<body>", "orders response", e.to_string()))?;
    if !fetched.contains_order(&order_id) {
        return Err(AssertionFailure::new(
            "orders",
            format!("list containing {order_id}"),
            format!("{} orders without it", fetched.orders.len()),
        )
        .into());
    }

    Ok(created.order.number)
}
