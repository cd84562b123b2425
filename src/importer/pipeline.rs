use crate::{
    abstract_trait::{
        DynCategoryCommandRepository, DynCategoryQueryRepository, DynProductCommandRepository,
    },
    domain::{requests::NewProduct, responses::ImportReport},
    errors::ServiceError,
    importer::{CategoryDirectory, InvalidNumericPolicy, RowOutcome, RowParser},
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

/// Orchestrates one bulk import: stream lines, parse, resolve categories,
/// accumulate, flush as a single transactional batch.
///
/// Category creations flush immediately (resolve-or-create) and survive a
/// later batch failure; product rows are all-or-nothing.
pub struct ImportPipeline {
    category_query: DynCategoryQueryRepository,
    category_command: DynCategoryCommandRepository,
    product_command: DynProductCommandRepository,
    policy: InvalidNumericPolicy,
}

impl ImportPipeline {
    pub fn new(
        category_query: DynCategoryQueryRepository,
        category_command: DynCategoryCommandRepository,
        product_command: DynProductCommandRepository,
        policy: InvalidNumericPolicy,
    ) -> Self {
        Self {
            category_query,
            category_command,
            product_command,
            policy,
        }
    }

    pub async fn import<R>(&self, reader: &mut R) -> Result<ImportReport, ServiceError>
    where
        R: AsyncBufRead + Send + Unpin + ?Sized,
    {
        let parser = RowParser::new(self.policy);
        let mut directory =
            CategoryDirectory::preload(self.category_query.clone(), self.category_command.clone())
                .await?;

        let mut report = ImportReport::default();
        let mut batch: Vec<NewProduct> = Vec::new();
        let mut header_seen = false;
        let mut line_number: u64 = 0;

        let mut lines = (&mut *reader).lines();
        while let Some(line) = lines.next_line().await? {
            line_number += 1;

            match parser.parse_line(&line) {
                RowOutcome::Blank => continue,
                // First non-blank line is the header, whatever it says.
                _ if !header_seen => {
                    header_seen = true;
                    continue;
                }
                RowOutcome::Skip(reason) => {
                    report.skip(line_number, reason);
                }
                RowOutcome::Record(record) => {
                    let category_id = directory.resolve(&record.category_name).await?;

                    batch.push(NewProduct {
                        name: record.name,
                        description: if record.description.is_empty() {
                            None
                        } else {
                            Some(record.description)
                        },
                        price: record.price,
                        quantity: record.quantity,
                        category_id,
                    });
                }
            }
        }

        if !batch.is_empty() {
            self.product_command
                .create_products_batch(&batch)
                .await
                .map_err(|err| {
                    error!("❌ Batch insert of {} imported products failed: {err}", batch.len());
                    ServiceError::from(err)
                })?;
        }

        report.imported = batch.len();

        info!(
            "✅ Import finished: {} imported, {} skipped",
            report.imported,
            report.skipped.len()
        );

        Ok(report)
    }
}
