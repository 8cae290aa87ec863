//! Schema bootstrap
//!
//! Creates the tables described by the SeaORM entities when they are missing.

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::entity::products;
use crate::error::DomainError;

/// Create the `products` table if it does not exist yet
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(products::Entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement))
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    tracing::debug!("Schema ready");
    Ok(())
}
