use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use pulse_core::{AccountStore, AccountStoreError, Address, Role, TaxId, UserAccount};

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    tax_id: String,
    birth_date: NaiveDate,
    email: String,
    role: String,
    registered_at: DateTime<Utc>,
    credential_id: Option<Uuid>,
    street: String,
    complement: Option<String>,
    neighborhood: String,
    postal_code: String,
    city: String,
    state: String,
}

impl AccountRow {
    fn into_account(self) -> Result<UserAccount, AccountStoreError> {
        let address = Address::new(
            self.street,
            self.complement,
            self.neighborhood,
            self.postal_code,
            self.city,
            self.state,
        )
        .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        let tax_id =
            TaxId::parse(&self.tax_id).map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;
        Ok(UserAccount::from_record(
            self.id,
            self.name,
            tax_id,
            self.birth_date,
            address,
            self.email,
            role,
            self.registered_at,
            self.credential_id,
        ))
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, tax_id, birth_date, email, role, registered_at, \
     credential_id, street, complement, neighborhood, postal_code, city, state FROM accounts";

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn insert(&self, account: UserAccount) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO accounts
                    (id, name, tax_id, birth_date, email, role, registered_at,
                     credential_id, street, complement, neighborhood, postal_code, city, state)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(account.id())
        .bind(account.name())
        .bind(account.tax_id().as_str())
        .bind(account.birth_date())
        .bind(account.email())
        .bind(account.role().as_str())
        .bind(account.registered_at())
        .bind(account.credential_id())
        .bind(account.address().street())
        .bind(account.address().complement())
        .bind(account.address().neighborhood())
        .bind(account.address().postal_code())
        .bind(account.address().city())
        .bind(account.address().state());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return AccountStoreError::AlreadyExists;
                }
            }
            AccountStoreError::Unexpected(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update(&self, account: UserAccount) -> Result<(), AccountStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE accounts
                SET name = $2, birth_date = $3, email = $4, role = $5,
                    credential_id = $6, street = $7, complement = $8,
                    neighborhood = $9, postal_code = $10, city = $11, state = $12
                WHERE id = $1
            "#,
        )
        .bind(account.id())
        .bind(account.name())
        .bind(account.birth_date())
        .bind(account.email())
        .bind(account.role().as_str())
        .bind(account.credential_id())
        .bind(account.address().street())
        .bind(account.address().complement())
        .bind(account.address().neighborhood())
        .bind(account.address().postal_code())
        .bind(account.address().city())
        .bind(account.address().state());

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<UserAccount, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::NotFound);
        };

        row.into_account()
    }

    #[tracing::instrument(name = "Listing accounts from PostgreSQL", skip_all)]
    async fn find_all(&self) -> Result<Vec<UserAccount>, AccountStoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    #[tracing::instrument(name = "Deleting account from PostgreSQL", skip_all)]
    async fn delete(&self, id: Uuid) -> Result<(), AccountStoreError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }

        Ok(())
    }
}
