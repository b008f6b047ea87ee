//! Checklist creation, listing, detail updates, and spot-check sampling.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use super::checklist::{
    Checklist, ChecklistDetail, ChecklistOverview, CreatedChecklist, NamedDetail, SampledProduct,
};
use super::error::Error;
use super::ports::{ChecklistRepository, ProductRepository};
use super::product::{JanCode, Product};

/// Smallest spot-check sample drawn by [`ChecklistService::sample_random`].
pub const SAMPLE_MIN: usize = 20;
/// Largest spot-check sample drawn by [`ChecklistService::sample_random`].
pub const SAMPLE_MAX: usize = 30;

/// Checklist operations over the checklist and product repositories.
pub struct ChecklistService {
    checklists: Arc<dyn ChecklistRepository>,
    products: Arc<dyn ProductRepository>,
}

impl ChecklistService {
    pub fn new(
        checklists: Arc<dyn ChecklistRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            checklists,
            products,
        }
    }

    /// Create a checklist for `owner` covering the given barcodes.
    ///
    /// The identifier is the current global maximum plus one, read and
    /// written without coordination; concurrent creators can collide.
    pub async fn create(
        &self,
        owner: &str,
        jancodes: Vec<JanCode>,
    ) -> Result<CreatedChecklist, Error> {
        if jancodes.is_empty() {
            return Err(Error::invalid_request("jancodes must be a non-empty array"));
        }
        let map_store = |error| {
            warn!(%error, "checklist creation failed");
            Error::internal("Failed to create checklist")
        };

        let next_id = self
            .checklists
            .max_checklist_id()
            .await
            .map_err(map_store)?
            .map_or(1, |max| max + 1);

        let checklist = Checklist::created_on(next_id, Utc::now().date_naive(), owner);
        self.checklists
            .insert_checklist(checklist.clone())
            .await
            .map_err(map_store)?;

        let details: Vec<ChecklistDetail> = jancodes
            .iter()
            .cloned()
            .map(|jancode| ChecklistDetail::blank(next_id, jancode))
            .collect();
        self.checklists
            .insert_details(details.clone())
            .await
            .map_err(map_store)?;

        let products = self
            .products
            .find_by_jancodes(&jancodes)
            .await
            .map_err(map_store)?;
        let details = join_names(details, &products);

        info!(checklist_id = next_id, owner, items = details.len(), "checklist created");
        Ok(CreatedChecklist { checklist, details })
    }

    /// All of `owner`'s checklists, newest first, each carrying its detail
    /// count and name-resolved details.
    pub async fn list(&self, owner: &str) -> Result<Vec<ChecklistOverview>, Error> {
        let map_store = |error| {
            warn!(%error, "checklist listing failed");
            Error::internal("Failed to fetch checklists")
        };

        let checklists = self
            .checklists
            .list_for_owner(owner)
            .await
            .map_err(map_store)?;
        let details = self.checklists.list_all_details().await.map_err(map_store)?;

        let codes: Vec<JanCode> = details.iter().map(|detail| detail.jancode.clone()).collect();
        let products = self
            .products
            .find_by_jancodes(&codes)
            .await
            .map_err(map_store)?;

        let mut grouped: HashMap<i32, Vec<ChecklistDetail>> = HashMap::new();
        for detail in details {
            grouped.entry(detail.checklist_id).or_default().push(detail);
        }

        // Duplicate identifiers share a detail group, so look up without
        // consuming the entry.
        Ok(checklists
            .into_iter()
            .map(|checklist| {
                let own = grouped.get(&checklist.checklist_id).cloned().unwrap_or_default();
                ChecklistOverview {
                    total: own.len(),
                    details: join_names(own, &products),
                    checklist,
                }
            })
            .collect())
    }

    /// Record a dateline on the detail matching the identifier and barcode.
    ///
    /// The identifier arrives as request text and must parse as an integer.
    pub async fn update_detail(
        &self,
        checklist_id_text: &str,
        jancode: &JanCode,
        dateline: &str,
    ) -> Result<(), Error> {
        let checklist_id: i32 = checklist_id_text
            .parse()
            .map_err(|_| Error::invalid_request("checklistId must be an integer"))?;

        let matched = self
            .checklists
            .update_detail(checklist_id, jancode, dateline, Utc::now())
            .await
            .map_err(|error| {
                warn!(%error, "detail update failed");
                Error::internal("Failed to update product")
            })?;
        if !matched {
            return Err(Error::not_found("Checklist detail not found"));
        }
        Ok(())
    }

    /// Draw a random spot-check sample from the catalog.
    ///
    /// The sample size is uniform in [`SAMPLE_MIN`, `SAMPLE_MAX`], capped at
    /// the catalog size, with distinct storage-order offsets.
    pub async fn sample_random(&self) -> Result<Vec<SampledProduct>, Error> {
        let map_store = |error| {
            warn!(%error, "checklist sampling failed");
            Error::internal("Failed to search checklists")
        };

        let count = self.products.count().await.map_err(map_store)?;
        let count = usize::try_from(count).unwrap_or(0);
        if count == 0 {
            return Ok(Vec::new());
        }

        let offsets = {
            let mut rng = rand::thread_rng();
            let amount = rng.gen_range(SAMPLE_MIN..=SAMPLE_MAX).min(count);
            rand::seq::index::sample(&mut rng, count, amount)
        };

        let mut sampled = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let product: Option<Product> =
                self.products.nth(offset as i64).await.map_err(map_store)?;
            if let Some(product) = product {
                sampled.push(SampledProduct::from(product));
            }
        }
        Ok(sampled)
    }
}

/// Resolve detail barcodes against product names, composing the read view.
///
/// Codes without a catalog entry resolve to a null name.
fn join_names(details: Vec<ChecklistDetail>, products: &[Product]) -> Vec<NamedDetail> {
    let names: HashMap<&str, &str> = products
        .iter()
        .map(|product| (product.jancode.as_ref(), product.name.as_str()))
        .collect();
    details
        .into_iter()
        .map(|detail| {
            let name = names.get(detail.jancode.as_ref()).map(|name| (*name).to_owned());
            NamedDetail { detail, name }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{InMemoryChecklistRepository, InMemoryProductRepository};
    use crate::domain::ErrorCode;

    fn jancode(raw: &str) -> JanCode {
        JanCode::new(raw).expect("valid code")
    }

    fn product(code: &str, name: &str) -> Product {
        Product {
            jancode: jancode(code),
            name: name.to_owned(),
            dateline: None,
            date_discount: 30,
            date_recall: 20,
        }
    }

    fn service_with(products: Vec<Product>) -> ChecklistService {
        ChecklistService::new(
            Arc::new(InMemoryChecklistRepository::new()),
            Arc::new(InMemoryProductRepository::with_products(products)),
        )
    }

    #[tokio::test]
    async fn create_rejects_an_empty_code_list() {
        let err = service_with(vec![])
            .create("alice", vec![])
            .await
            .expect_err("creation rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "jancodes must be a non-empty array");
    }

    #[tokio::test]
    async fn create_assigns_one_on_an_empty_store_and_joins_names() {
        let service = service_with(vec![product("111", "milk")]);
        let created = service
            .create("alice", vec![jancode("111"), jancode("999")])
            .await
            .expect("create checklist");

        assert_eq!(created.checklist.checklist_id, 1);
        assert_eq!(created.checklist.status, 0);
        assert_eq!(created.details.len(), 2);
        assert_eq!(created.details[0].name.as_deref(), Some("milk"));
        assert_eq!(created.details[1].name, None);
        assert!(created.details.iter().all(|d| d.detail.dateline.is_none()));
    }

    #[tokio::test]
    async fn sequential_creates_produce_strictly_increasing_ids() {
        let service = service_with(vec![]);
        let first = service
            .create("alice", vec![jancode("111")])
            .await
            .expect("create checklist");
        let second = service
            .create("alice", vec![jancode("222")])
            .await
            .expect("create checklist");
        assert!(second.checklist.checklist_id > first.checklist.checklist_id);
    }

    #[tokio::test]
    async fn listing_groups_details_and_counts_them() {
        let service = service_with(vec![product("111", "milk")]);
        service
            .create("alice", vec![jancode("111"), jancode("222")])
            .await
            .expect("create checklist");
        service
            .create("bob", vec![jancode("111")])
            .await
            .expect("create checklist");

        let overviews = service.list("alice").await.expect("list checklists");
        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[0].total, 2);
        assert_eq!(overviews[0].details[0].name.as_deref(), Some("milk"));
    }

    #[tokio::test]
    async fn checklists_sharing_an_identifier_list_the_same_details() {
        let checklists = Arc::new(InMemoryChecklistRepository::new());
        let date = Utc::now().date_naive();
        for _ in 0..2 {
            checklists
                .insert_checklist(Checklist::created_on(1, date, "alice"))
                .await
                .expect("insert checklist");
        }
        checklists
            .insert_details(vec![
                ChecklistDetail::blank(1, jancode("111")),
                ChecklistDetail::blank(1, jancode("222")),
            ])
            .await
            .expect("insert details");

        let service = ChecklistService::new(
            checklists,
            Arc::new(InMemoryProductRepository::new()),
        );
        let overviews = service.list("alice").await.expect("list checklists");
        assert_eq!(overviews.len(), 2);
        for overview in &overviews {
            assert_eq!(overview.total, 2);
            assert_eq!(overview.details.len(), 2);
        }
    }

    #[tokio::test]
    async fn update_detail_sets_dateline_and_timestamp() {
        let service = service_with(vec![]);
        service
            .create("alice", vec![jancode("111")])
            .await
            .expect("create checklist");

        let before = Utc::now();
        service
            .update_detail("1", &jancode("111"), "2026-09-01")
            .await
            .expect("update detail");

        let overviews = service.list("alice").await.expect("list checklists");
        let detail = &overviews[0].details[0].detail;
        assert_eq!(detail.dateline.as_deref(), Some("2026-09-01"));
        assert!(detail.datetime.expect("timestamp set") >= before);
    }

    #[tokio::test]
    async fn update_detail_on_unmatched_pair_is_not_found() {
        let err = service_with(vec![])
            .update_detail("7", &jancode("111"), "2026-09-01")
            .await
            .expect_err("update rejected");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Checklist detail not found");
    }

    #[tokio::test]
    async fn update_detail_rejects_non_numeric_identifiers() {
        let err = service_with(vec![])
            .update_detail("seven", &jancode("111"), "2026-09-01")
            .await
            .expect_err("update rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn sampling_is_distinct_and_clamped_to_the_catalog() {
        let products: Vec<Product> = (0..5)
            .map(|i| product(&format!("code-{i}"), &format!("product {i}")))
            .collect();
        let sampled = service_with(products)
            .sample_random()
            .await
            .expect("sample catalog");

        assert_eq!(sampled.len(), 5);
        let mut codes: Vec<&str> = sampled.iter().map(|p| p.jancode.as_ref()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 5);
        assert!(sampled.iter().all(|p| p.dateline == "null"));
    }

    #[tokio::test]
    async fn sampling_a_large_catalog_stays_within_bounds() {
        let products: Vec<Product> = (0..100)
            .map(|i| product(&format!("code-{i}"), &format!("product {i}")))
            .collect();
        let sampled = service_with(products)
            .sample_random()
            .await
            .expect("sample catalog");
        assert!((SAMPLE_MIN..=SAMPLE_MAX).contains(&sampled.len()));
    }

    #[tokio::test]
    async fn sampling_an_empty_catalog_returns_nothing() {
        let sampled = service_with(vec![])
            .sample_random()
            .await
            .expect("sample catalog");
        assert!(sampled.is_empty());
    }
}
