use crate::core::error::AdminError;
use crate::core::field::{FieldValue, ToFieldValue};
use crate::core::query::SortDirection;
use crate::core::record::RecordId;
use crate::core::validation::{self, FilterChain, PayloadFilter, rule_error};
use crate::mutation::Mutation;
use crate::view::{ListView, SortPreset};
use chrono::{NaiveDate, SecondsFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::sync::OnceLock;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    #[default]
    Percentage,
    Flat,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "PERCENTAGE"),
            DiscountType::Flat => write!(f, "FLAT"),
        }
    }
}

impl ToFieldValue for DiscountType {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

crate::impl_record!(
    /// A discount coupon
    Coupon,
    "coupons",
    ["code", "discount", "expiry", "discountValue", "expiryDate"],
    {
        code: String,
        discount_type: DiscountType,
        discount_value: f64,
        /// Cap for percentage coupons
        max_discount: Option<f64>,
        expiry_date: Option<chrono::DateTime<chrono::Utc>>,
        is_active: bool,
        /// Preformatted discount label (e.g. "10%") on older payloads
        discount: String,
        /// Preformatted expiry (`YYYY-MM-DD`) on older payloads
        expiry: String,
    }
);

impl Coupon {
    /// "10%" or "₹250", preferring the backend's own label
    pub fn discount_label(&self) -> String {
        if !self.discount.is_empty() {
            return self.discount.clone();
        }
        match self.discount_type {
            DiscountType::Percentage => format!("{}%", self.discount_value),
            DiscountType::Flat => format!("₹{}", self.discount_value),
        }
    }

    pub fn expiry_label(&self) -> String {
        match &self.expiry_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.expiry.clone(),
        }
    }
}

pub const SORT_PRESETS: &[SortPreset] = &[
    SortPreset::new("asc", "Code (A → Z)", "code", SortDirection::Asc),
    SortPreset::new("desc", "Code (Z → A)", "code", SortDirection::Desc),
];

/// The coupons screen: search code, discount or expiry; sorted by code
pub fn list_view() -> ListView<Coupon> {
    ListView::new().with_sort(SORT_PRESETS[0].spec())
}

pub fn delete(id: RecordId) -> Mutation {
    Mutation::delete(id).confirm_with("Are you sure you want to delete this coupon?")
}

fn valid_code(code: &str) -> Result<(), ValidationError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(rule_error("required", "Coupon code is required"));
    }
    static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
    if !regex.is_match(code) {
        return Err(rule_error(
            "format",
            "Coupon code may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}

fn positive_amount(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(()),
        _ => Err(rule_error("amount", "Discount value must be a positive number")),
    }
}

fn calendar_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| rule_error("date", "Expiry date must be a valid date"))
}

/// The add-coupon form, as typed
#[derive(Debug, Clone, Validate)]
pub struct CouponDraft {
    #[validate(custom(function = "valid_code"))]
    pub code: String,
    pub discount_type: DiscountType,
    #[validate(custom(function = "positive_amount"))]
    pub discount_value: String,
    /// Only sent for percentage coupons, and only when filled in
    pub max_discount: String,
    /// `YYYY-MM-DD`
    #[validate(custom(function = "calendar_date"))]
    pub expiry_date: String,
    pub is_active: bool,
}

impl Default for CouponDraft {
    fn default() -> Self {
        Self {
            code: String::new(),
            discount_type: DiscountType::Percentage,
            discount_value: String::new(),
            max_discount: String::new(),
            expiry_date: String::new(),
            is_active: true,
        }
    }
}

impl CouponDraft {
    fn sends_max_discount(&self) -> bool {
        self.discount_type == DiscountType::Percentage && !self.max_discount.trim().is_empty()
    }

    pub fn check(&self) -> Result<(), AdminError> {
        validation::check(self)?;
        if self.sends_max_discount() {
            positive_amount(&self.max_discount).map_err(|_| {
                AdminError::field("maxDiscount", "Max discount must be a positive number")
            })?;
        }
        Ok(())
    }

    fn filters() -> FilterChain {
        FilterChain::new()
            .field("code", [PayloadFilter::Trim, PayloadFilter::Uppercase])
            .field("discountValue", [PayloadFilter::RoundDecimals(2)])
            .field("maxDiscount", [PayloadFilter::RoundDecimals(2)])
    }

    fn parse_amount(field: &str, value: &str) -> Result<f64, AdminError> {
        value
            .trim()
            .parse()
            .map_err(|_| AdminError::field(field, format!("{} must be a number", field)))
    }

    /// `POST /api/coupons`
    ///
    /// The expiry is sent as midnight UTC of the chosen day.
    pub fn create(&self) -> Result<Mutation, AdminError> {
        self.check()?;

        let expiry = NaiveDate::parse_from_str(self.expiry_date.trim(), "%Y-%m-%d")
            .map_err(|_| AdminError::field("expiryDate", "Expiry date must be a valid date"))?
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();

        let mut payload = json!({
            "code": self.code,
            "discountType": self.discount_type,
            "discountValue": Self::parse_amount("discountValue", &self.discount_value)?,
            "expiryDate": expiry.to_rfc3339_opts(SecondsFormat::Millis, true),
            "isActive": self.is_active,
        });
        if self.sends_max_discount() {
            payload["maxDiscount"] = json!(Self::parse_amount("maxDiscount", &self.max_discount)?);
        }

        Ok(Mutation::create(Self::filters().apply(payload)).with_success("Coupon added successfully!"))
    }
}
