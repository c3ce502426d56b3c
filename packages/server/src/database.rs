use std::time::Duration;

use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::entity::{invoice, stored_file};

/// Connect to the database and make sure the schema exists. Startup fails
/// fast here if the database is unreachable.
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(20)
        .min_connections(2)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    ensure_schema(&db).await?;

    Ok(db)
}

/// Create the tables if they do not exist. The schema is small enough to
/// create idempotently at startup; there is no migration framework.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut invoices: TableCreateStatement = schema.create_table_from_entity(invoice::Entity);
    invoices.if_not_exists();
    db.execute(backend.build(&invoices)).await?;

    let mut files: TableCreateStatement = schema.create_table_from_entity(stored_file::Entity);
    files.if_not_exists();
    db.execute(backend.build(&files)).await?;

    Ok(())
}
