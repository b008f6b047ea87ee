//! Domain primitives, services, and persistence ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the services that implement the application's
//! operations, and the repository ports those services depend on. Keep
//! entity types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic operation failure.
//! - User, UserAccount, Mode — account identity and the binary mode flag.
//! - Product, CustomProduct, JanCode — catalog records and the barcode key.
//! - Checklist, ChecklistDetail and their read views — dated product batches.
//! - OcrSetting — free-form OCR configuration values.
//! - AccountService, CatalogService, ChecklistService, SettingsService —
//!   the application operations.
//! - TokenService, Claims — bearer credential issuance and verification.

mod account_service;
mod catalog_service;
pub mod checklist;
mod checklist_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod product;
pub mod settings;
mod settings_service;
pub mod token;
pub mod user;

pub use self::account_service::AccountService;
pub use self::catalog_service::CatalogService;
pub use self::checklist::{
    Checklist, ChecklistDetail, ChecklistOverview, CreatedChecklist, NamedDetail, SampledProduct,
    CHECKLIST_NAME_PREFIX,
};
pub use self::checklist_service::{ChecklistService, SAMPLE_MAX, SAMPLE_MIN};
pub use self::error::{Error, ErrorCode};
pub use self::product::{
    CustomProduct, JanCode, Product, ProductValidationError, DEFAULT_DISCOUNT_DAYS,
    DEFAULT_RECALL_DAYS, NO_MASTER_NAME,
};
pub use self::settings::OcrSetting;
pub use self::settings_service::SettingsService;
pub use self::token::{Claims, TokenService, TOKEN_TTL_SECS};
pub use self::user::{Mode, User, UserAccount, UserValidationError};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
