use std::sync::Arc;

use rstest::*;

use model::order::{OrderRequest, OrderResponse, OrdersResponse};
use model::user::{UserResponse, UserUpdate};
use reqwest::StatusCode;
use stellar_burgers_contract::fixtures::{TeardownOutcome, UserFixture};
use stellar_burgers_contract::http::{ApiClient, ApiRequest, Endpoint, Transport};
use stellar_burgers_contract::requests::{order_body, update_user_body};
use stellar_burgers_contract::scenarios::catalog::VALID_INGREDIENTS;

use crate::fixtures::service::{service_fixture, ServiceFixture};

#[rstest]
#[tokio::test]
async fn created_order_shows_up_in_user_orders(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await;
    let client = Arc::new(ApiClient::new(&fixture.config).unwrap());
    let users = UserFixture::new(client.clone(), &fixture.config);
    let mut user = users.setup().await.unwrap();

    let created = client
        .send(
            ApiRequest::new(Endpoint::CreateOrder)
                .with_token(user.access_token())
                .with_body(order_body(&OrderRequest::new(VALID_INGREDIENTS.iter().copied()))),
        )
        .await
        .unwrap();
    let created: OrderResponse = serde_json::from_str(created.raw_body()).unwrap();
    let order_id = created.order.id.unwrap();

    let fetched = client
        .send(ApiRequest::new(Endpoint::FetchOrders).with_token(user.access_token()))
        .await
        .unwrap();
    let fetched: OrdersResponse = serde_json::from_str(fetched.raw_body()).unwrap();

    assert!(fetched.success);
    assert!(fetched.contains_order(&order_id));
    assert!(matches!(
        users.teardown(&mut user).await.unwrap(),
        TeardownOutcome::Deleted(_)
    ));
    assert_eq!(TeardownOutcome::Skipped, users.teardown(&mut user).await.unwrap());
    assert_eq!(0, fixture.leaked_accounts());
}

#[rstest]
#[tokio::test]
async fn fixture_emails_are_unique_across_setups(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await;
    let client = Arc::new(ApiClient::new(&fixture.config).unwrap());
    let users = UserFixture::new(client, &fixture.config);

    let mut first = users.setup().await.unwrap();
    let mut second = users.setup().await.unwrap();

    assert_ne!(first.email, second.email);
    assert_eq!(2, fixture.service.registered_users());
    users.teardown(&mut first).await.unwrap();
    users.teardown(&mut second).await.unwrap();
    assert_eq!(0, fixture.leaked_accounts());
}

#[rstest]
#[tokio::test]
async fn updated_name_is_returned_by_the_service(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await;
    let client = Arc::new(ApiClient::new(&fixture.config).unwrap());
    let users = UserFixture::new(client.clone(), &fixture.config);
    let mut user = users.setup().await.unwrap();

    let update = UserUpdate {
        name: Some("Updated Username".to_owned()),
        ..UserUpdate::default()
    };
    let response = client
        .send(
            ApiRequest::new(Endpoint::UpdateUser)
                .with_token(user.access_token())
                .with_body(update_user_body(&update)),
        )
        .await
        .unwrap();
    let updated: UserResponse = serde_json::from_str(response.raw_body()).unwrap();

    assert!(updated.success);
    assert_eq!("Updated Username", updated.user.name);
    assert_eq!(user.email, updated.user.email);
    users.teardown(&mut user).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn repeated_delete_is_rejected_and_counted_once(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await;
    let client = Arc::new(ApiClient::new(&fixture.config).unwrap());
    let users = UserFixture::new(client.clone(), &fixture.config);
    let user = users.setup().await.unwrap();
    let delete = || {
        client.send(ApiRequest::new(Endpoint::DeleteUser).with_token(user.access_token()))
    };

    let first = delete().await.unwrap();
    let second = delete().await.unwrap();
    let _leaked = users.setup().await.unwrap();

    assert_eq!(StatusCode::ACCEPTED, first.status());
    assert_eq!(StatusCode::NOT_FOUND, second.status());
    assert_eq!(1, fixture.service.deleted_users());
    assert_eq!(1, fixture.leaked_accounts());
}

#[rstest]
#[tokio::test]
async fn delete_with_unknown_token_removes_nothing(#[future] service_fixture: ServiceFixture) {
    let fixture = service_fixture.await;
    let client = ApiClient::new(&fixture.config).unwrap();

    let response = client
        .send(ApiRequest::new(Endpoint::DeleteUser).with_token(Some("Bearer forged")))
        .await
        .unwrap();

    assert_eq!(StatusCode::FORBIDDEN, response.status());
    assert_eq!(0, fixture.service.deleted_users());
}
