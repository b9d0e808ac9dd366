//! Loads tag and ingredient reference data from CSV files.
//!
//! ```text
//! foodgram-import --tags data/tags.csv --ingredients data/ingredients.csv
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use foodgram::server::{
    error::{config::ConfigError, Error},
    service::import::{ImportReport, ImportService},
    startup,
};

#[derive(Parser, Debug)]
#[command(name = "foodgram-import", about = "Import Foodgram reference data from CSV files")]
struct Args {
    /// CSV file with `name,color,slug` rows
    #[arg(long)]
    tags: Option<PathBuf>,

    /// CSV file with `name,measurement_unit` rows
    #[arg(long)]
    ingredients: Option<PathBuf>,

    /// Database to import into, defaults to `DATABASE_URL`
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let args = Args::parse();

    if args.tags.is_none() && args.ingredients.is_none() {
        tracing::warn!("Nothing to import, pass --tags and/or --ingredients");
        return;
    }

    if let Err(e) = run(args).await {
        tracing::error!("Import failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Error> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
    };

    let db = startup::connect_with_migrations(&database_url).await?;
    let import_service = ImportService::new(&db);

    if let Some(path) = args.tags {
        let input = tokio::fs::read_to_string(&path).await?;
        let report = import_service.import_tags(&input).await?;

        log_report("tags", &path, report);
    }

    if let Some(path) = args.ingredients {
        let input = tokio::fs::read_to_string(&path).await?;
        let report = import_service.import_ingredients(&input).await?;

        log_report("ingredients", &path, report);
    }

    Ok(())
}

fn log_report(kind: &str, path: &Path, report: ImportReport) {
    tracing::info!(
        file = %path.display(),
        inserted = report.inserted,
        skipped = report.skipped,
        "Imported {}",
        kind
    );
}
