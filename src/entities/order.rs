use crate::client::ActionMethod;
use crate::core::field::{FieldValue, ToFieldValue};
use crate::core::query::SortDirection;
use crate::core::record::RecordId;
use crate::mutation::Mutation;
use crate::view::{ListView, SortPreset};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One product line of an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl ToFieldValue for OrderLine {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.name.clone())
    }
}

crate::impl_record!(
    /// A customer order
    Order,
    "orders",
    ["customerName", "products"],
    {
        /// Human-readable order number (e.g. "#1026")
        order_id: String,
        customer_name: String,
        products: Vec<OrderLine>,
        total_quantity: i64,
        total_amount: f64,
        payment_method: String,
        order_status: String,
    }
);

pub const ORDER_STATUSES: &[&str] = &[
    "Pending",
    "Processing",
    "Shipped",
    "Delivered",
    "Cancelled",
    "Returned",
];

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("date", "Date (Newest)", "createdAt", SortDirection::Desc),
    SortPreset::new("amount", "Amount (High → Low)", "totalAmount", SortDirection::Desc),
];

pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this order?";

/// The orders screen: search customer or product names; filter by status
pub fn list_view() -> ListView<Order> {
    ListView::new().with_filter_field("orderStatus")
}

/// Status dropdown: "All" then every order status, whether or not present
pub fn status_options() -> Vec<String> {
    std::iter::once(crate::core::query::ALL)
        .chain(ORDER_STATUSES.iter().copied())
        .map(str::to_string)
        .collect()
}

/// `PATCH /{id}/status` to "Cancelled"; asks first
pub fn cancel(id: RecordId) -> Mutation {
    Mutation::action(
        ActionMethod::Patch,
        id,
        "status",
        Some(json!({ "orderStatus": "Cancelled" })),
    )
    .confirm_with(CANCEL_PROMPT)
    .with_success("Order cancelled successfully")
}
