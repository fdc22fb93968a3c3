use serde::{Deserialize, Serialize};

/// Ingredient identifiers for one order, in the order they are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRequest {
    pub ingredient_ids: Vec<String>,
}

impl OrderRequest {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredient_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredient_ids.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest<'a> {
    pub ingredients: &'a [String],
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderInfo {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub number: u64,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default)]
    pub name: Option<String>,
    pub order: OrderInfo,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrdersResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<OrderInfo>,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "totalToday", default)]
    pub total_today: u64,
}

impl OrdersResponse {
    pub fn contains_order(&self, order_id: &str) -> bool {
        self.orders
            .iter()
            .any(|order| order.id.as_deref() == Some(order_id))
    }
}
