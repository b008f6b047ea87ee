//! Row and insert structs bridging the schema and the domain types.
//!
//! Conversions into domain types validate stored values; rows that no longer
//! satisfy domain invariants surface as query errors rather than panics.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{checklist_details, checklists, custom_products, ocr_settings, products, users};
use crate::domain::ports::PersistenceError;
use crate::domain::{
    Checklist, ChecklistDetail, CustomProduct, JanCode, Mode, OcrSetting, Product, UserAccount,
};

fn bad_row(table: &str, reason: &str) -> PersistenceError {
    PersistenceError::query(format!("invalid {table} row: {reason}"))
}

fn jancode_from_row(table: &str, raw: String) -> Result<JanCode, PersistenceError> {
    JanCode::new(raw).map_err(|err| bad_row(table, &err.to_string()))
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub username: String,
    pub password: String,
    pub mode: i16,
}

impl UserRow {
    pub fn into_domain(self) -> Result<UserAccount, PersistenceError> {
        let mode = u8::try_from(self.mode)
            .ok()
            .and_then(|raw| Mode::new(raw).ok())
            .ok_or_else(|| bad_row("users", "mode out of range"))?;
        Ok(UserAccount::new(self.username, self.password, mode))
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub jancode: String,
    pub name: String,
    pub dateline: Option<String>,
    pub date_discount: i32,
    pub date_recall: i32,
}

impl ProductRow {
    pub fn into_domain(self) -> Result<Product, PersistenceError> {
        Ok(Product {
            jancode: jancode_from_row("products", self.jancode)?,
            name: self.name,
            dateline: self.dateline,
            date_discount: self.date_discount,
            date_recall: self.date_recall,
        })
    }

    pub fn from_domain(product: &Product) -> Self {
        Self {
            jancode: product.jancode.as_ref().to_owned(),
            name: product.name.clone(),
            dateline: product.dateline.clone(),
            date_discount: product.date_discount,
            date_recall: product.date_recall,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = custom_products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomProductRow {
    pub id: Uuid,
    pub jancode: String,
    pub name: String,
    pub dateline: String,
    pub date_discount: i32,
    pub date_recall: i32,
    pub username: String,
}

impl CustomProductRow {
    pub fn into_domain(self) -> Result<CustomProduct, PersistenceError> {
        Ok(CustomProduct {
            id: self.id,
            jancode: jancode_from_row("custom_products", self.jancode)?,
            name: self.name,
            dateline: self.dateline,
            date_discount: self.date_discount,
            date_recall: self.date_recall,
            username: self.username,
        })
    }

    pub fn from_domain(custom: &CustomProduct) -> Self {
        Self {
            id: custom.id,
            jancode: custom.jancode.as_ref().to_owned(),
            name: custom.name.clone(),
            dateline: custom.dateline.clone(),
            date_discount: custom.date_discount,
            date_recall: custom.date_recall,
            username: custom.username.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = checklists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChecklistRow {
    pub id: Uuid,
    pub checklist_id: i32,
    pub checklist_name: String,
    pub date_create: String,
    pub status: i32,
    pub username: String,
}

impl ChecklistRow {
    pub fn into_domain(self) -> Checklist {
        Checklist {
            checklist_id: self.checklist_id,
            checklist_name: self.checklist_name,
            date_create: self.date_create,
            status: self.status,
            username: self.username,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = checklists)]
pub struct NewChecklistRow {
    pub id: Uuid,
    pub checklist_id: i32,
    pub checklist_name: String,
    pub date_create: String,
    pub status: i32,
    pub username: String,
}

impl NewChecklistRow {
    pub fn from_domain(checklist: &Checklist) -> Self {
        Self {
            id: Uuid::new_v4(),
            checklist_id: checklist.checklist_id,
            checklist_name: checklist.checklist_name.clone(),
            date_create: checklist.date_create.clone(),
            status: checklist.status,
            username: checklist.username.clone(),
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = checklist_details)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChecklistDetailRow {
    pub id: Uuid,
    pub checklist_id: i32,
    pub jancode: String,
    pub dateline: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub seq: i32,
}

impl ChecklistDetailRow {
    pub fn into_domain(self) -> Result<ChecklistDetail, PersistenceError> {
        Ok(ChecklistDetail {
            checklist_id: self.checklist_id,
            jancode: jancode_from_row("checklist_details", self.jancode)?,
            dateline: self.dateline,
            datetime: self.datetime,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = checklist_details)]
pub struct NewChecklistDetailRow {
    pub id: Uuid,
    pub checklist_id: i32,
    pub jancode: String,
    pub dateline: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
    pub seq: i32,
}

impl NewChecklistDetailRow {
    pub fn from_domain(detail: &ChecklistDetail, seq: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            checklist_id: detail.checklist_id,
            jancode: detail.jancode.as_ref().to_owned(),
            dateline: detail.dateline.clone(),
            datetime: detail.datetime,
            seq,
        }
    }
}

#[derive(Debug, Queryable, Selectable, Insertable)]
#[diesel(table_name = ocr_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OcrSettingRow {
    pub id: Uuid,
    pub value: String,
}

impl OcrSettingRow {
    pub fn into_domain(self) -> OcrSetting {
        OcrSetting {
            id: self.id,
            value: self.value,
        }
    }

    pub fn from_domain(setting: &OcrSetting) -> Self {
        Self {
            id: setting.id,
            value: setting.value.clone(),
        }
    }
}
