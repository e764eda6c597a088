use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use pulse_core::{Credential, CredentialStore, CredentialStoreError, TaxId};

#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresCredentialStore { pool }
    }

    async fn exists(&self, id: Uuid) -> Result<bool, CredentialStoreError> {
        let row = sqlx::query("SELECT 1 FROM credentials WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;
        Ok(row.is_some())
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    tax_id: String,
    password_hash: String,
    account_id: Uuid,
    failed_attempts: i32,
    version: i64,
}

impl CredentialRow {
    fn into_credential(self) -> Result<Credential, CredentialStoreError> {
        let tax_id = TaxId::parse(&self.tax_id)
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;
        Ok(Credential::from_record(
            self.id,
            tax_id,
            Secret::from(self.password_hash),
            self.account_id,
            self.failed_attempts as u32,
            self.version as u64,
        ))
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, tax_id, password_hash, account_id, failed_attempts, version FROM credentials";

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Adding credential to PostgreSQL", skip_all)]
    async fn insert(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        sqlx::query(
            r#"
                INSERT INTO credentials
                    (id, tax_id, password_hash, account_id, failed_attempts, version)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id())
        .bind(credential.tax_id().as_str())
        .bind(credential.password_hash().expose_secret())
        .bind(credential.account_id())
        .bind(credential.failed_attempts() as i32)
        .bind(credential.version() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return CredentialStoreError::AlreadyExists;
                }
            }
            CredentialStoreError::Unexpected(e.to_string())
        })?;

        Ok(())
    }

    /// Version-checked write. The WHERE clause carries the version the caller
    /// read; a row modified in between matches nothing and the write is
    /// reported as a conflict.
    #[tracing::instrument(name = "Updating credential in PostgreSQL", skip_all)]
    async fn update(&self, credential: Credential) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE credentials
                SET password_hash = $3, failed_attempts = $4, version = version + 1
                WHERE id = $1 AND version = $2
            "#,
        )
        .bind(credential.id())
        .bind(credential.version() as i64)
        .bind(credential.password_hash().expose_secret())
        .bind(credential.failed_attempts() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            if self.exists(credential.id()).await? {
                return Err(CredentialStoreError::VersionConflict);
            }
            return Err(CredentialStoreError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving credential from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<Credential, CredentialStoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        let Some(row) = row else {
            return Err(CredentialStoreError::NotFound);
        };

        row.into_credential()
    }

    #[tracing::instrument(name = "Retrieving credential by tax id from PostgreSQL", skip_all)]
    async fn find_by_tax_id(&self, tax_id: &TaxId) -> Result<Credential, CredentialStoreError> {
        let row =
            sqlx::query_as::<_, CredentialRow>(&format!("{SELECT_COLUMNS} WHERE tax_id = $1"))
                .bind(tax_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        let Some(row) = row else {
            return Err(CredentialStoreError::NotFound);
        };

        row.into_credential()
    }

    #[tracing::instrument(name = "Listing credentials from PostgreSQL", skip_all)]
    async fn find_all(&self) -> Result<Vec<Credential>, CredentialStoreError> {
        let rows = sqlx::query_as::<_, CredentialRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        rows.into_iter().map(CredentialRow::into_credential).collect()
    }

    #[tracing::instrument(name = "Deleting credential from PostgreSQL", skip_all)]
    async fn delete(&self, id: Uuid) -> Result<(), CredentialStoreError> {
        let result = sqlx::query("DELETE FROM credentials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| CredentialStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::NotFound);
        }

        Ok(())
    }
}
