//! Checklist data model and denormalised read views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::product::{JanCode, Product};

/// Prefix of generated checklist names; the creation date is appended.
pub const CHECKLIST_NAME_PREFIX: &str = "チェックリスト";

/// A dated batch of products a user must inspect or update.
///
/// `checklist_id` is assigned by reading the current maximum and adding one.
/// The storage layer enforces no uniqueness on it, so concurrent creators can
/// be assigned the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub checklist_id: i32,
    pub checklist_name: String,
    /// ISO date string (`YYYY-MM-DD`); lexicographic order matches date order.
    pub date_create: String,
    pub status: i32,
    #[serde(rename = "user")]
    pub username: String,
}

impl Checklist {
    /// Build a fresh checklist for `username` dated `date`, with the
    /// generated display name and initial status 0.
    pub fn created_on(checklist_id: i32, date: NaiveDate, username: impl Into<String>) -> Self {
        let date_create = date.format("%Y-%m-%d").to_string();
        Self {
            checklist_id,
            checklist_name: format!("{CHECKLIST_NAME_PREFIX} {date_create}"),
            date_create,
            status: 0,
            username: username.into(),
        }
    }
}

/// One product's status within a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistDetail {
    pub checklist_id: i32,
    pub jancode: JanCode,
    pub dateline: Option<String>,
    /// Instant of the last dateline update, null until the first update.
    pub datetime: Option<DateTime<Utc>>,
}

impl ChecklistDetail {
    /// A blank detail row for a newly created checklist.
    pub fn blank(checklist_id: i32, jancode: JanCode) -> Self {
        Self {
            checklist_id,
            jancode,
            dateline: None,
            datetime: None,
        }
    }
}

/// A detail row with the product name resolved against the catalog.
///
/// `name` is null when the code has no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDetail {
    #[serde(flatten)]
    pub detail: ChecklistDetail,
    pub name: Option<String>,
}

/// Creation response view: the checklist with its name-resolved details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedChecklist {
    #[serde(flatten)]
    pub checklist: Checklist,
    pub details: Vec<NamedDetail>,
}

/// Listing view: the checklist enriched with its detail count and details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistOverview {
    #[serde(flatten)]
    pub checklist: Checklist,
    pub total: usize,
    pub details: Vec<NamedDetail>,
}

/// Catalog product annotated for spot-check sampling.
///
/// `dateline` and `datetime` carry the literal string `null`, not JSON null;
/// existing clients key off the string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledProduct {
    pub jancode: JanCode,
    pub name: String,
    pub date_discount: i32,
    pub date_recall: i32,
    pub dateline: String,
    pub datetime: String,
}

impl From<Product> for SampledProduct {
    fn from(product: Product) -> Self {
        Self {
            jancode: product.jancode,
            name: product.name,
            date_discount: product.date_discount,
            date_recall: product.date_recall,
            dateline: "null".to_owned(),
            datetime: "null".to_owned(),
        }
    }
}
