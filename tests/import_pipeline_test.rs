use async_trait::async_trait;
use chrono::Utc;
use inventory_api::{
    abstract_trait::{
        CategoryCommandRepositoryTrait, CategoryQueryRepositoryTrait,
        ProductCommandRepositoryTrait,
    },
    domain::requests::{
        CreateCategoryRequest, CreateProductRequest, NewProduct, UpdateProductRequest,
    },
    errors::{RepositoryError, ServiceError},
    importer::{ImportPipeline, InvalidNumericPolicy, SkipReason},
    model::{Category, Product},
};
use rust_decimal::Decimal;
use std::{
    collections::HashSet,
    io,
    pin::Pin,
    sync::{Arc, Mutex},
    task::{Context, Poll},
};
use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

/// In-memory stand-in for the category and product stores. Shared behind an
/// `Arc` so assertions can inspect what the pipeline wrote.
#[derive(Default)]
struct FakeStore {
    categories: Mutex<Vec<Category>>,
    products: Mutex<Vec<NewProduct>>,
    next_category_id: Mutex<i32>,
    /// Names that lose the create race exactly once: the "concurrent" winner
    /// row appears in the store and the create call reports AlreadyExists.
    conflict_names: Mutex<HashSet<String>>,
    fail_batch: Mutex<bool>,
}

impl FakeStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            next_category_id: Mutex::new(1),
            ..Default::default()
        })
    }

    fn seed_category(self: &Arc<Self>, name: &str) -> i32 {
        let mut next_id = self.next_category_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        self.categories.lock().unwrap().push(Category {
            category_id: id,
            name: name.to_string(),
            created_at: Some(Utc::now().naive_utc()),
        });
        id
    }

    fn conflict_on(self: &Arc<Self>, name: &str) {
        self.conflict_names
            .lock()
            .unwrap()
            .insert(name.to_lowercase());
    }

    fn fail_next_batch(self: &Arc<Self>) {
        *self.fail_batch.lock().unwrap() = true;
    }

    fn category_count(&self) -> usize {
        self.categories.lock().unwrap().len()
    }

    fn products(&self) -> Vec<NewProduct> {
        self.products.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for FakeStore {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for FakeStore {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<Category, RepositoryError> {
        let key = req.name.to_lowercase();

        let staged_conflict = self.conflict_names.lock().unwrap().remove(&key);

        {
            let exists = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .any(|c| c.name.eq_ignore_ascii_case(&req.name));
            if exists {
                return Err(RepositoryError::AlreadyExists(req.name.clone()));
            }
        }

        let mut next_id = self.next_category_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        self.categories.lock().unwrap().push(Category {
            category_id: id,
            name: req.name.clone(),
            created_at: Some(Utc::now().naive_utc()),
        });

        if staged_conflict {
            // The row now exists (the winner's insert) but this caller's
            // insert was rejected by the unique index.
            return Err(RepositoryError::AlreadyExists(req.name.clone()));
        }

        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.category_id == id)
            .cloned()
            .unwrap())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for FakeStore {
    async fn create_product(
        &self,
        _req: &CreateProductRequest,
    ) -> Result<Product, RepositoryError> {
        unimplemented!("not exercised by the import pipeline")
    }

    async fn update_product(
        &self,
        _req: &UpdateProductRequest,
    ) -> Result<Product, RepositoryError> {
        unimplemented!("not exercised by the import pipeline")
    }

    async fn trash_product(&self, _id: i32) -> Result<Product, RepositoryError> {
        unimplemented!("not exercised by the import pipeline")
    }

    async fn create_products_batch(
        &self,
        products: &[NewProduct],
    ) -> Result<u64, RepositoryError> {
        if *self.fail_batch.lock().unwrap() {
            return Err(RepositoryError::Custom("batch insert failed".to_string()));
        }

        self.products
            .lock()
            .unwrap()
            .extend(products.iter().cloned());
        Ok(products.len() as u64)
    }
}

fn pipeline(store: &Arc<FakeStore>, policy: InvalidNumericPolicy) -> ImportPipeline {
    ImportPipeline::new(
        store.clone(),
        store.clone(),
        store.clone(),
        policy,
    )
}

async fn run(
    store: &Arc<FakeStore>,
    policy: InvalidNumericPolicy,
    input: &str,
) -> Result<inventory_api::domain::responses::ImportReport, ServiceError> {
    let mut reader = input.as_bytes();
    pipeline(store, policy).import(&mut reader).await
}

/// Serves its buffered bytes, then fails like a dropped connection instead of
/// reporting a clean end of stream.
struct BrokenReader {
    data: &'static [u8],
    pos: usize,
}

impl BrokenReader {
    fn new(data: &'static [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.pos >= this.data.len() {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "upload stream cut off",
            )));
        }

        let remaining = &this.data[this.pos..];
        let n = remaining.len().min(buf.remaining());
        buf.put_slice(&remaining[..n]);
        this.pos += n;
        Poll::Ready(Ok(()))
    }
}

impl AsyncBufRead for BrokenReader {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        let this = self.get_mut();
        if this.pos >= this.data.len() {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "upload stream cut off",
            )));
        }

        Poll::Ready(Ok(&this.data[this.pos..]))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.get_mut().pos += amt;
    }
}

const HEADER: &str = "ProductName,Price,Quantity,CategoryName,Description";

#[tokio::test]
async fn imports_all_valid_rows() {
    let store = FakeStore::new();

    let input = format!(
        "{HEADER}\nWidget,9.99,10,Tools,A widget\nGadget,19.99,0,Tools,\n"
    );
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert!(report.skipped.is_empty());

    // One "Tools" category, both rows resolved to it.
    assert_eq!(store.category_count(), 1);
    let products = store.products();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category_id, products[1].category_id);

    assert_eq!(products[1].name, "Gadget");
    assert_eq!(products[1].quantity, 0);
    assert_eq!(products[1].description, None);
    assert_eq!(products[0].price, Decimal::new(999, 2));
}

#[tokio::test]
async fn header_only_returns_zero_without_writes() {
    let store = FakeStore::new();

    let report = run(&store, InvalidNumericPolicy::RejectRow, HEADER)
        .await
        .unwrap();

    assert_eq!(report.imported, 0);
    assert!(report.skipped.is_empty());
    assert_eq!(store.category_count(), 0);
    assert!(store.products().is_empty());
}

#[tokio::test]
async fn header_is_skipped_regardless_of_content() {
    let store = FakeStore::new();

    // No recognizable header; the first non-blank line is dropped anyway.
    let input = "Widget,9.99,10,Tools,A widget\nGadget,19.99,5,Tools,\n";
    let report = run(&store, InvalidNumericPolicy::RejectRow, input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(store.products()[0].name, "Gadget");
}

#[tokio::test]
async fn short_row_is_skipped_and_reported() {
    let store = FakeStore::new();

    let input = format!("{HEADER}\nWidget,9.99,10,Tools,\nBadRow,5\nGadget,19.99,5,Tools,\n");
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 3);
    assert_eq!(report.skipped[0].reason, SkipReason::TooFewFields);
}

#[tokio::test]
async fn blank_lines_are_dropped_silently() {
    let store = FakeStore::new();

    let input = format!("\n   \n{HEADER}\n\nWidget,9.99,10,Tools,\n\n");
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert!(report.skipped.is_empty());
}

#[tokio::test]
async fn invalid_price_rejected_under_default_policy() {
    let store = FakeStore::new();

    let input = format!("{HEADER}\nWidget,not-a-price,10,Tools,\nGadget,19.99,5,Tools,\n");
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidNumeric);
    assert_eq!(store.products()[0].name, "Gadget");
}

#[tokio::test]
async fn invalid_numerics_become_zero_under_compat_policy() {
    let store = FakeStore::new();

    let input = format!("{HEADER}\nWidget,not-a-price,many,Tools,\n");
    let report = run(&store, InvalidNumericPolicy::DefaultZero, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert!(report.skipped.is_empty());

    let products = store.products();
    assert_eq!(products[0].price, Decimal::ZERO);
    assert_eq!(products[0].quantity, 0);
}

#[tokio::test]
async fn existing_category_is_reused_case_insensitively() {
    let store = FakeStore::new();
    let electronics_id = store.seed_category("Electronics");

    let input = format!("{HEADER}\nPhone,499.99,3,electronics,\n");
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(store.category_count(), 1);
    assert_eq!(store.products()[0].category_id, electronics_id);
}

#[tokio::test]
async fn new_categories_created_once_per_name() {
    let store = FakeStore::new();

    let input = format!(
        "{HEADER}\nHammer,5.00,1,Tools,\nSaw,8.00,1,Tools,\nApple,1.00,50,Food,\nPear,1.20,40,food,\n"
    );
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 4);
    assert_eq!(store.category_count(), 2);

    let products = store.products();
    assert_eq!(products[0].category_id, products[1].category_id);
    assert_eq!(products[2].category_id, products[3].category_id);
    assert_ne!(products[0].category_id, products[2].category_id);
}

#[tokio::test]
async fn lost_create_race_is_re_resolved() {
    let store = FakeStore::new();
    store.conflict_on("Tools");

    let input = format!("{HEADER}\nWidget,9.99,10,Tools,\nGadget,19.99,5,Tools,\n");
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    // The unique-index rejection is absorbed; both rows land on the winner's
    // category row and no duplicate is created.
    assert_eq!(report.imported, 2);
    assert_eq!(store.category_count(), 1);
    let products = store.products();
    assert_eq!(products[0].category_id, products[1].category_id);
}

#[tokio::test]
async fn rerun_doubles_products_but_not_categories() {
    let store = FakeStore::new();

    let input = format!("{HEADER}\nWidget,9.99,10,Tools,\nGadget,19.99,5,Tools,\n");

    let first = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();
    let second = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(first.imported, 2);
    assert_eq!(second.imported, 2);
    assert_eq!(store.products().len(), 4);
    assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn negative_numerics_are_skipped_and_reported() {
    let store = FakeStore::new();

    let input = format!(
        "{HEADER}\nWidget,-1.00,10,Tools,\nGadget,9.99,-5,Tools,\nHammer,5.00,1,Tools,\n"
    );
    let report = run(&store, InvalidNumericPolicy::RejectRow, &input)
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].reason, SkipReason::InvalidNumeric);
    assert_eq!(report.skipped[1].line, 3);
    assert_eq!(report.skipped[1].reason, SkipReason::InvalidNumeric);
    assert_eq!(store.products()[0].name, "Hammer");
}

#[tokio::test]
async fn stream_read_failure_aborts_without_product_writes() {
    let store = FakeStore::new();

    // The reader dies after two complete rows; whatever was parsed so far
    // must not reach the product store.
    let mut reader = BrokenReader::new(
        b"ProductName,Price,Quantity,CategoryName,Description\nWidget,9.99,10,Tools,\nGad",
    );
    let result = pipeline(&store, InvalidNumericPolicy::RejectRow)
        .import(&mut reader)
        .await;

    assert!(matches!(result, Err(ServiceError::Io(_))));
    assert!(store.products().is_empty());
    // Categories resolved before the failure stay behind, at-least-once.
    assert_eq!(store.category_count(), 1);
}

#[tokio::test]
async fn batch_failure_propagates_as_error() {
    let store = FakeStore::new();
    store.fail_next_batch();

    let input = format!("{HEADER}\nWidget,9.99,10,Tools,\n");
    let result = run(&store, InvalidNumericPolicy::RejectRow, &input).await;

    assert!(result.is_err());
    // No partial product rows; the category created on the way persists
    // (at-least-once category creation).
    assert!(store.products().is_empty());
    assert_eq!(store.category_count(), 1);
}
