//! Reference data import from CSV files.
//!
//! Tag rows are `name,color,slug` and ingredient rows are `name,measurement_unit`, without a
//! header row. Rows whose slug (tags) or name (ingredients) already exists are skipped so an
//! import can be re-run safely.

use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::server::{
    data::{ingredient::IngredientRepository, tag::TagRepository},
    error::{validation::ValidationError, Error},
    service::tag::normalize_color,
    util::csv,
};

/// Number of rows inserted and skipped by one import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
}

pub struct ImportService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ImportService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Imports tags from CSV text in a single transaction.
    ///
    /// # Returns
    /// - `Ok(ImportReport)` - Every row was inserted or skipped
    /// - `Err(Error::ValidationError)` - Malformed CSV, wrong column count, invalid color or a
    ///   new slug whose name or color is already taken, nothing was imported
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn import_tags(&self, input: &str) -> Result<ImportReport, Error> {
        let rows = parse_rows(input, 3)?;

        let txn = self.db.begin().await?;
        let tag_repo = TagRepository::new(&txn);

        let mut report = ImportReport::default();
        for (index, row) in rows.iter().enumerate() {
            let (name, color, slug) = (row[0].trim(), row[1].trim(), row[2].trim());

            if tag_repo.exists_by_slug(slug).await? {
                report.skipped += 1;
                continue;
            }

            let color = normalize_color(color)?;
            tag_repo
                .create(name, &color, slug)
                .await
                .map_err(|err| tag_conflict(err, index + 1))?;
            report.inserted += 1;
        }

        txn.commit().await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Imported tags"
        );

        Ok(report)
    }

    /// Imports ingredients from CSV text in a single transaction.
    pub async fn import_ingredients(&self, input: &str) -> Result<ImportReport, Error> {
        let rows = parse_rows(input, 2)?;

        let txn = self.db.begin().await?;
        let ingredient_repo = IngredientRepository::new(&txn);

        let mut report = ImportReport::default();
        for row in rows {
            let (name, measurement_unit) = (row[0].trim(), row[1].trim());

            if ingredient_repo.exists_by_name(name).await? {
                report.skipped += 1;
                continue;
            }

            ingredient_repo.create(name, measurement_unit).await?;
            report.inserted += 1;
        }

        txn.commit().await?;

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Imported ingredients"
        );

        Ok(report)
    }
}

/// A tag insert can only violate the name or color uniqueness once the slug is known to be new
fn tag_conflict(err: DbErr, row: usize) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ValidationError::MalformedBody(format!(
            "row {} reuses the name or color of an existing tag",
            row
        ))
        .into(),
        _ => err.into(),
    }
}

fn parse_rows(input: &str, columns: usize) -> Result<Vec<Vec<String>>, ValidationError> {
    let rows = csv::parse(input)?;

    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(ValidationError::MalformedBody(format!(
                "row {} has {} columns, expected {}",
                index + 1,
                row.len(),
                columns
            )));
        }
    }

    Ok(rows)
}
