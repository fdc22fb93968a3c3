use super::{
    Area, EmailSource, Expected, OrderPayload, PasswordSource, RequestSpec, Scenario,
};

pub const VALID_INGREDIENTS: &[&str] = &["61c0c5a71d1f82001bdaaa6d", "61c0c5a71d1f82001bdaaa76"];

/// Well-formed ids that match no ingredient.
pub const UNKNOWN_INGREDIENTS: &[&str] = &["21c0c5a71d1f82001bdaaa6d", "21c0c5a71d1f82001bdaaa76"];

/// Ids that are not valid object ids at all.
pub const MALFORMED_INGREDIENTS: &[&str] = &["21c0c5a71d1f820bdaaa6d", "21c0c51d1f82001bdaaa76"];

pub const USER_ALREADY_EXISTS: &str = "User already exists";
pub const INCORRECT_CREDENTIALS: &str = "email or password are incorrect";
pub const SHOULD_BE_AUTHORISED: &str = "You should be authorised";

const MALFORMED_IDS_QUIRK: &str =
    "malformed ingredient ids crash the service with 500 instead of a 400 validation error";

/// Every scenario, in execution order.
pub fn default_catalog() -> Vec<Scenario> {
    let mut scenarios = auth_scenarios();
    scenarios.extend(user_scenarios());
    scenarios.extend(order_scenarios());
    scenarios
}

fn auth_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "register_unique_user",
            Area::Auth,
            RequestSpec::Register {
                email: EmailSource::Fresh("test"),
                password: PasswordSource::Default,
                name: "X",
            },
        )
        .expect_eq("success", true)
        .expect("accessToken", Expected::NonEmpty)
        .expect("user.email", Expected::EchoesRequest("email"))
        .expect("user.name", Expected::EchoesRequest("name")),
        Scenario::new(
            "register_existing_user",
            Area::Auth,
            RequestSpec::Register {
                email: EmailSource::FixtureUser,
                password: PasswordSource::Literal("password123"),
                name: "ExistingUser",
            },
        )
        .expect_status(403)
        .expect_eq("success", false)
        .expect_eq("message", USER_ALREADY_EXISTS),
        Scenario::new(
            "register_without_email",
            Area::Auth,
            RequestSpec::Register {
                email: EmailSource::Missing,
                password: PasswordSource::Literal("password123"),
                name: "MissingEmailUser",
            },
        )
        .expect_status(403)
        .expect_eq("success", false),
        Scenario::new(
            "login_with_valid_credentials",
            Area::Auth,
            RequestSpec::Login {
                email: EmailSource::FixtureUser,
                password: PasswordSource::FixtureUser,
            },
        )
        .expect_eq("success", true)
        .expect("accessToken", Expected::NonEmpty),
        Scenario::new(
            "login_with_invalid_credentials",
            Area::Auth,
            RequestSpec::Login {
                email: EmailSource::Literal("wrong-email@yandex.ru"),
                password: PasswordSource::Literal("wrong-password"),
            },
        )
        .expect_status(401)
        .expect_eq("success", false)
        .expect_eq("message", INCORRECT_CREDENTIALS),
    ]
}

fn user_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "update_email_with_authorization",
            Area::User,
            RequestSpec::UpdateUser {
                email: Some(EmailSource::Fresh("updated")),
                name: None,
            },
        )
        .authorized()
        .expect_eq("success", true)
        .expect("user.email", Expected::EchoesRequest("email")),
        Scenario::new(
            "update_name_with_authorization",
            Area::User,
            RequestSpec::UpdateUser {
                email: None,
                name: Some("Updated Username"),
            },
        )
        .authorized()
        .expect_eq("success", true)
        .expect("user.name", Expected::EchoesRequest("name")),
        Scenario::new(
            "update_email_without_authorization",
            Area::User,
            RequestSpec::UpdateUser {
                email: Some(EmailSource::Fresh("unauthorized-update")),
                name: None,
            },
        )
        .expect_status(401)
        .expect_eq("success", false)
        .expect_eq("message", SHOULD_BE_AUTHORISED),
        Scenario::new(
            "update_name_without_authorization",
            Area::User,
            RequestSpec::UpdateUser {
                email: None,
                name: Some("Unauthorized Name Update"),
            },
        )
        .expect_status(401)
        .expect_eq("success", false)
        .expect_eq("message", SHOULD_BE_AUTHORISED),
    ]
}

fn order_scenarios() -> Vec<Scenario> {
    let create = RequestSpec::CreateOrder;

    vec![
        Scenario::new(
            "create_order_with_authorization",
            Area::Orders,
            create(OrderPayload::Ingredients(VALID_INGREDIENTS)),
        )
        .authorized()
        .expect_eq("success", true)
        .expect("order._id", Expected::NonEmpty),
        Scenario::new(
            "create_order_without_authorization",
            Area::Orders,
            create(OrderPayload::Ingredients(VALID_INGREDIENTS)),
        )
        .expect_eq("success", true)
        .expect("order.number", Expected::Exists),
        Scenario::new(
            "create_order_with_authorization_without_body",
            Area::Orders,
            create(OrderPayload::NoBody),
        )
        .authorized()
        .expect_status(400)
        .expect_eq("success", false),
        Scenario::new(
            "create_order_without_authorization_without_body",
            Area::Orders,
            create(OrderPayload::NoBody),
        )
        .expect_status(400)
        .expect_eq("success", false),
        Scenario::new(
            "create_order_with_empty_ingredient_list",
            Area::Orders,
            create(OrderPayload::EmptyList),
        )
        .authorized()
        .expect_status(400)
        .expect_eq("success", false),
        Scenario::new(
            "create_order_with_unknown_ingredients",
            Area::Orders,
            create(OrderPayload::Ingredients(UNKNOWN_INGREDIENTS)),
        )
        .authorized()
        .expect_status(400)
        .expect_eq("success", false),
        Scenario::new(
            "create_order_with_malformed_ingredients",
            Area::Orders,
            create(OrderPayload::Ingredients(MALFORMED_INGREDIENTS)),
        )
        .authorized()
        .expect_known_quirk(500, 400, MALFORMED_IDS_QUIRK),
        Scenario::new(
            "fetch_orders_with_authorization",
            Area::Orders,
            RequestSpec::FetchOrders,
        )
        .authorized()
        .expect_eq("success", true)
        .expect("orders", Expected::Exists),
        Scenario::new(
            "fetch_orders_without_authorization",
            Area::Orders,
            RequestSpec::FetchOrders,
        )
        .expect_status(401)
        .expect_eq("success", false),
    ]
}

/// Narrows the catalog. A filter equal to an area name keeps that area,
/// anything else keeps scenarios whose name contains it.
pub fn select(scenarios: Vec<Scenario>, filter: Option<&str>) -> Vec<Scenario> {
    let Some(filter) = filter.map(str::trim).filter(|filter| !filter.is_empty()) else {
        return scenarios;
    };

    let by_area = scenarios
        .iter()
        .any(|scenario| scenario.area.as_str() == filter);
    scenarios
        .into_iter()
        .filter(|scenario| {
            if by_area {
                scenario.area.as_str() == filter
            } else {
                scenario.name.contains(filter)
            }
        })
        .collect()
}
