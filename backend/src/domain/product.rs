//! Product catalog data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel product name recorded when a scanned code has no master record.
pub const NO_MASTER_NAME: &str = "商品マスタなし";
/// Default discount deadline offset, in days, for registered unknown codes.
pub const DEFAULT_DISCOUNT_DAYS: i32 = 60;
/// Default recall deadline offset, in days, for registered unknown codes.
pub const DEFAULT_RECALL_DAYS: i32 = 40;

/// Validation errors for product value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyJanCode,
    PaddedJanCode,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyJanCode => write!(f, "jancode must not be empty"),
            Self::PaddedJanCode => write!(f, "jancode must not contain surrounding whitespace"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Product barcode identifier, the catalog key.
///
/// # Examples
/// ```
/// use shelfcheck_backend::domain::JanCode;
///
/// let code = JanCode::new("4901234567890").expect("valid code");
/// assert_eq!(code.as_ref(), "4901234567890");
/// assert!(JanCode::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JanCode(String);

impl JanCode {
    /// Validate and construct a [`JanCode`].
    pub fn new(code: impl Into<String>) -> Result<Self, ProductValidationError> {
        let code = code.into();
        if code.is_empty() {
            return Err(ProductValidationError::EmptyJanCode);
        }
        if code.trim() != code {
            return Err(ProductValidationError::PaddedJanCode);
        }
        Ok(Self(code))
    }
}

impl AsRef<str> for JanCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for JanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<JanCode> for String {
    fn from(value: JanCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for JanCode {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Catalog product record.
///
/// `dateline` is only populated for products created through unknown-code
/// registration; pre-seeded master records leave it null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub jancode: JanCode,
    pub name: String,
    pub dateline: Option<String>,
    pub date_discount: i32,
    pub date_recall: i32,
}

impl Product {
    /// The placeholder product recorded when a scanned code has no master
    /// record.
    pub fn no_master(jancode: JanCode, dateline: impl Into<String>) -> Self {
        Self {
            jancode,
            name: NO_MASTER_NAME.to_owned(),
            dateline: Some(dateline.into()),
            date_discount: DEFAULT_DISCOUNT_DAYS,
            date_recall: DEFAULT_RECALL_DAYS,
        }
    }
}

/// Per-user audit row recording an unknown-code registration.
///
/// Duplicates are allowed: registering an already-known code still appends a
/// new row carrying the dateline supplied by the registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProduct {
    pub id: Uuid,
    pub jancode: JanCode,
    pub name: String,
    pub dateline: String,
    pub date_discount: i32,
    pub date_recall: i32,
    #[serde(rename = "user")]
    pub username: String,
}

impl CustomProduct {
    /// Attribute a registration of `product` to `username`.
    pub fn from_registration(product: &Product, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            jancode: product.jancode.clone(),
            name: product.name.clone(),
            dateline: product.dateline.clone().unwrap_or_default(),
            date_discount: product.date_discount,
            date_recall: product.date_recall,
            username: username.into(),
        }
    }
}
