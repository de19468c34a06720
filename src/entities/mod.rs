//! Typed records for each admin screen
//!
//! Each module defines the record (through [`impl_record!`](crate::impl_record)),
//! the list view configuration its screen uses, and the mutations its forms
//! and buttons produce.

pub mod macros;

pub mod category;
pub mod collection;
pub mod coupon;
pub mod customer;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod tag;
pub mod user;

pub use category::Category;
pub use collection::Collection;
pub use coupon::{Coupon, CouponDraft, DiscountType};
pub use customer::Customer;
pub use inquiry::Inquiry;
pub use order::{Order, OrderLine};
pub use product::{Product, ProductForm, ProductImage, Variant};
pub use tag::{Tag, TagDraft};
pub use user::User;
