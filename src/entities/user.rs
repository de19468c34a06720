use crate::core::query::SortDirection;
use crate::view::{ListView, SortPreset};

crate::impl_record!(
    /// A registered storefront user account
    User,
    "users",
    ["name", "email", "userId"],
    {
        name: String,
        email: String,
        phone: String,
        user_id: String,
    }
);

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("name-asc", "Name (A → Z)", "name", SortDirection::Asc),
    SortPreset::new("name-desc", "Name (Z → A)", "name", SortDirection::Desc),
    SortPreset::new("email-asc", "Email (A → Z)", "email", SortDirection::Asc),
    SortPreset::new("email-desc", "Email (Z → A)", "email", SortDirection::Desc),
    SortPreset::new("date-asc", "Oldest", "createdAt", SortDirection::Asc),
    SortPreset::new("date-desc", "Newest", "createdAt", SortDirection::Desc),
];

/// The users screen, sorted by name
pub fn list_view() -> ListView<User> {
    ListView::new().with_sort(SORT_PRESETS[0].spec())
}
