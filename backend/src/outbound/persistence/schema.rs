//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Login records. `mode` is the binary per-user flag (0 or 1).
    users (username) {
        username -> Varchar,
        /// Bcrypt hash, or legacy cleartext for records predating hashing.
        password -> Varchar,
        mode -> Int2,
    }
}

diesel::table! {
    /// Master product catalog keyed by barcode.
    products (jancode) {
        jancode -> Varchar,
        name -> Varchar,
        /// Null for pre-seeded master records; set for registered unknowns.
        dateline -> Nullable<Varchar>,
        date_discount -> Int4,
        date_recall -> Int4,
    }
}

diesel::table! {
    /// Per-user unknown-code registration audit rows. Duplicates allowed.
    custom_products (id) {
        id -> Uuid,
        jancode -> Varchar,
        name -> Varchar,
        dateline -> Varchar,
        date_discount -> Int4,
        date_recall -> Int4,
        username -> Varchar,
    }
}

diesel::table! {
    /// Checklist headers. `checklist_id` deliberately carries no unique
    /// index; identifier assignment is read-then-write.
    checklists (id) {
        id -> Uuid,
        checklist_id -> Int4,
        checklist_name -> Varchar,
        /// ISO date string `YYYY-MM-DD`.
        date_create -> Varchar,
        status -> Int4,
        username -> Varchar,
    }
}

diesel::table! {
    /// Checklist detail rows. `seq` preserves insertion order within a batch.
    checklist_details (id) {
        id -> Uuid,
        checklist_id -> Int4,
        jancode -> Varchar,
        dateline -> Nullable<Varchar>,
        datetime -> Nullable<Timestamptz>,
        seq -> Int4,
    }
}

diesel::table! {
    /// Free-form OCR configuration values.
    ocr_settings (id) {
        id -> Uuid,
        value -> Varchar,
    }
}
