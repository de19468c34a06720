use crate::core::query::SortDirection;
use crate::view::{ListView, SortPreset};

crate::impl_record!(
    /// A storefront customer with order totals
    Customer,
    "customers",
    ["name", "email", "phone"],
    {
        name: String,
        email: String,
        phone: String,
        total_orders: i64,
        total_spent: f64,
        status: String,
        /// Registration date as `YYYY-MM-DD`
        registered: String,
    }
);

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("orders", "Most Orders", "totalOrders", SortDirection::Desc),
    SortPreset::new("spent", "Highest Spent", "totalSpent", SortDirection::Desc),
    SortPreset::new("registered", "Newest", "registered", SortDirection::Desc),
];

/// The customers screen: search name, email or phone; filter by status
pub fn list_view() -> ListView<Customer> {
    ListView::new().with_filter_field("status")
}
