//! # Storefront Admin
//!
//! Client core of an e-commerce admin dashboard: typed collections over a
//! REST backend, list views with search, categorical filter and sort, and
//! a mutation dispatcher that keeps each screen's snapshot in step with the
//! backend.
//!
//! ## Features
//!
//! - **Remote Collections**: list/get/create/update/remove plus sub-resource verbs,
//!   tolerant of bare-array and `{data: [...]}` responses
//! - **List Views**: case-insensitive search, an `"All"`-aware category filter
//!   and a stable total-order sort, recomputed from the snapshot
//! - **Mutations**: confirmation before destructive writes, patch-in-place or
//!   refetch afterwards, success and error notices
//! - **Screen State**: `Idle → Loading → Ready/Error`, `Ready → Submitting → Ready`,
//!   last-request-wins loading
//! - **Typed Records**: one `impl_record!` line per backend resource
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//! use storefront::entities::tag;
//!
//! let config = DashboardConfig::from_yaml_file("dashboard.yaml")?.with_env_overrides();
//! init_tracing(&config.logging)?;
//!
//! let api = ApiClient::new(&config.api)?;
//! let mut screen = Screen::new(api.collection::<Tag>(), tag::list_view());
//! screen.load().await;
//!
//! screen.view_mut().set_search("sum");
//! for tag in screen.view().rows() {
//!     println!("{}", tag.name);
//! }
//!
//! let mut dispatcher = MutationDispatcher::new(|prompt: &str| ask_user(prompt));
//! let mutation = TagDraft::new("Summer").create(screen.view().snapshot());
//! dispatcher.submit(&mut screen, mutation).await?;
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod entities;
pub mod mutation;
pub mod preferences;
pub mod screen;
pub mod session;
pub mod telemetry;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ALL, AdminError, CategoryFilter, FieldValue, JsonRecord, ListQuery, Notice, NoticeLevel,
        Notices, Record, RecordId, SortDirection, SortSpec, ToFieldValue, ValidationError,
    };

    // === Macros ===
    pub use crate::impl_record;

    // === Client ===
    pub use crate::client::{
        ActionMethod, ApiClient, CollectionSource, InMemoryCollection, RestCollection,
    };

    // === Views & Screens ===
    pub use crate::screen::{LoadOutcome, LoadTicket, Screen, ScreenState};
    pub use crate::view::{ListView, SortPreset};

    // === Mutations ===
    pub use crate::mutation::{
        AutoConfirm, Confirm, DenyAll, Mutation, MutationDispatcher, MutationKind,
        MutationOutcome, Reconcile,
    };

    // === Records ===
    pub use crate::entities::{
        Category, Collection, Coupon, CouponDraft, Customer, DiscountType, Inquiry, Order,
        Product, ProductForm, Tag, TagDraft, User,
    };

    // === Shell ===
    pub use crate::config::DashboardConfig;
    pub use crate::dashboard::DashboardStats;
    pub use crate::preferences::{PreferenceStore, Sidebar, Theme};
    pub use crate::session::{Credentials, Session};
    pub use crate::telemetry::init_tracing;

    // === External ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
