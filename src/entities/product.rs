//! Catalog products (`/api/products`)
//!
//! Products are the one resource with file uploads: creating or replacing
//! images goes through [`RestCollection::create_multipart`] with a form
//! built by [`ProductForm::multipart`]. Plain JSON edits go through the
//! mutation dispatcher like every other resource.
//!
//! [`RestCollection::create_multipart`]: crate::client::RestCollection::create_multipart

use crate::core::error::AdminError;
use crate::core::field::{FieldValue, ToFieldValue};
use crate::core::record::{Record, RecordId};
use crate::core::validation::{self, FilterChain, PayloadFilter, rule_error};
use crate::mutation::Mutation;
use crate::view::ListView;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductImage {
    pub url: String,
}

impl ToFieldValue for ProductImage {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.url.clone())
    }
}

/// A size variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub size: String,
}

impl ToFieldValue for Variant {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.size.clone())
    }
}

crate::impl_record!(
    /// A catalog product
    Product,
    "products",
    ["name", "brand", "category"],
    {
        name: String,
        brand: String,
        category: String,
        subcategory: String,
        gender: String,
        price: f64,
        discount_price: Option<f64>,
        stock: i64,
        is_active: bool,
        /// "Active" or "Out of Stock"
        status: String,
        images: Vec<ProductImage>,
        tags: Vec<String>,
        variants: Vec<Variant>,
    }
);

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

pub const STATUSES: &[&str] = &["Active", "Out of Stock"];

/// The products screen: search name, brand or category
pub fn list_view() -> ListView<Product> {
    ListView::new()
}

impl Product {
    /// First image, used as the list thumbnail
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    /// Full-record `PUT /{id}`
    ///
    /// The backend expects `variants` and `tags` as JSON-encoded strings.
    pub fn update(&self) -> Result<Mutation, AdminError> {
        let mut payload = serde_json::to_value(self)?;
        if let Some(object) = payload.as_object_mut() {
            object.insert(
                "variants".to_string(),
                Value::String(serde_json::to_string(&self.variants)?),
            );
            object.insert(
                "tags".to_string(),
                Value::String(serde_json::to_string(&self.tags)?),
            );
        }
        Ok(Mutation::update(self.id(), payload).with_success("Product updated successfully!"))
    }

    pub fn add_variant(&mut self, size: impl Into<String>) {
        self.variants.push(Variant { size: size.into() });
    }

    pub fn remove_variant(&mut self, index: usize) -> Option<Variant> {
        (index < self.variants.len()).then(|| self.variants.remove(index))
    }
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id).confirm_with(DELETE_PROMPT)
}

fn positive_price(price: &str) -> Result<(), ValidationError> {
    match price.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(()),
        _ => Err(rule_error("price", "Price must be a valid positive number")),
    }
}

fn non_negative_stock(stock: &str) -> Result<(), ValidationError> {
    match stock.trim().parse::<i64>() {
        Ok(value) if value >= 0 => Ok(()),
        _ => Err(rule_error("stock", "Stock must be a valid number (0 or more)")),
    }
}

/// An uploaded image file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The add-product form, as typed
#[derive(Debug, Clone, Validate)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub category: String,
    #[validate(custom(function = "positive_price"))]
    pub price: String,
    #[validate(custom(function = "non_negative_stock"))]
    pub stock: String,
    pub status: String,
    /// Image URL
    pub image: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            brand: String::new(),
            category: String::new(),
            price: String::new(),
            stock: String::new(),
            status: STATUSES[0].to_string(),
            image: String::new(),
        }
    }
}

impl ProductForm {
    /// Blank required fields are reported before any format errors
    pub fn check(&self) -> Result<(), AdminError> {
        let required = [&self.name, &self.category, &self.price, &self.stock, &self.image];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(AdminError::field("form", "Please fill all the fields"));
        }
        validation::check(self)
    }

    fn filters() -> FilterChain {
        FilterChain::new()
            .field("name", [PayloadFilter::Trim])
            .field("brand", [PayloadFilter::Trim])
            .field("category", [PayloadFilter::Trim])
            .field("price", [PayloadFilter::RoundDecimals(2)])
    }

    /// JSON payload with numeric price and stock
    pub fn payload(&self) -> Result<Value, AdminError> {
        self.check()?;
        let price: f64 = self.price.trim().parse().map_err(|_| {
            AdminError::field("price", "Price must be a valid positive number")
        })?;
        let stock: i64 = self.stock.trim().parse().map_err(|_| {
            AdminError::field("stock", "Stock must be a valid number (0 or more)")
        })?;

        let payload = json!({
            "name": self.name,
            "brand": self.brand,
            "category": self.category,
            "price": price,
            "stock": stock,
            "status": self.status,
            "isActive": self.status == STATUSES[0],
            "images": [{ "url": self.image.trim() }],
        });
        Ok(Self::filters().apply(payload))
    }

    pub fn create(&self) -> Result<Mutation, AdminError> {
        let payload = self.payload()?;
        Ok(Mutation::create(payload)
            .with_success(format!("Product \"{}\" added successfully!", self.name.trim())))
    }

    /// Multipart body for `POST /api/products` with uploaded images
    ///
    /// Scalar fields are sent as text parts; array fields as JSON strings.
    pub fn multipart(&self, uploads: Vec<ImageUpload>) -> Result<Form, AdminError> {
        let payload = self.payload()?;
        let mut form = Form::new();
        if let Some(object) = payload.as_object() {
            for (key, value) in object {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                form = form.text(key.clone(), text);
            }
        }

        for upload in uploads {
            let part = Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.content_type)
                .map_err(|e| AdminError::field("images", e.to_string()))?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}
