use crate::tools::fixtures::e2e::*;
use crate::tools::helper::{order_round_trip, print_with_time};
use crate::tools::runner::run_e2e_scenarios;
use rstest::rstest;
use std::sync::Arc;
use stellar_burgers_contract::fixtures::UserFixture;
use stellar_burgers_contract::http::ApiClient;
use stellar_burgers_contract::scenarios::catalog::VALID_INGREDIENTS;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn e2e_test_orders_contract(e2e_fixture: &E2EFixture) {
    run_e2e_scenarios("Orders Contract", "orders", e2e_fixture).await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn e2e_test_created_order_is_listed(e2e_fixture: &E2EFixture) {
    let client = Arc::new(ApiClient::new(&e2e_fixture.harness).unwrap());
    let users = UserFixture::new(client.clone(), &e2e_fixture.harness);

    print_with_time("[+] [Orders] - Register fixture user".to_string());
    let mut user = users.setup().await.unwrap();
    let token = user.access_token().unwrap_or_default().to_owned();

    let result = order_round_trip(client.as_ref(), &token, VALID_INGREDIENTS).await;

    print_with_time(format!("[-] [Orders] - Delete fixture user {}", user.email));
    users.teardown(&mut user).await.unwrap();
    let number = result.unwrap();
    assert!(number > 0);
}
