use crate::{
    abstract_trait::CustomerRepositoryTrait,
    domain::requests::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest},
    model::Customer as CustomerModel,
    repository::page_offset,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct CustomerPageRow {
    #[sqlx(flatten)]
    customer: CustomerModel,
    total_count: i64,
}

#[derive(Clone)]
pub struct CustomerRepository {
    db: ConnectionPool,
}

impl CustomerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    /// A page past the end returns no window rows, so the total needs its own query.
    async fn count(&self, search_pattern: Option<&str>) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM customers c
            WHERE ($1::TEXT IS NULL
                   OR c.name ILIKE '%' || $1 || '%'
                   OR c.email ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search_pattern)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count customers: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<(Vec<CustomerModel>, i64), RepositoryError> {
        info!("🔍 Fetching customers with search: {:?}", req.search);

        let limit = req.page_size as i64;
        let offset = page_offset(req.page, req.page_size);

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.trim())
        };

        let rows = sqlx::query_as::<_, CustomerPageRow>(
            r#"
            SELECT
                c.id,
                c.name,
                c.email,
                c.contact,
                COUNT(*) OVER() AS total_count
            FROM customers c
            WHERE ($1::TEXT IS NULL
                   OR c.name ILIKE '%' || $1 || '%'
                   OR c.email ILIKE '%' || $1 || '%')
            ORDER BY c.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch customers: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => self.count(search_pattern).await?,
            None => 0,
        };
        let customers = rows.into_iter().map(|r| r.customer).collect();

        Ok((customers, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, RepositoryError> {
        info!("🆔 Fetching customer by ID: {}", id);

        sqlx::query_as::<_, CustomerModel>(
            "SELECT id, name, email, contact FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch customer {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CustomerModel>, RepositoryError> {
        info!("📧 Fetching customer by email: {}", email);

        sqlx::query_as::<_, CustomerModel>(
            "SELECT id, name, email, contact FROM customers WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch customer by email {}: {:?}", email, e);
            RepositoryError::from(e)
        })
    }

    async fn create(&self, req: &CreateCustomerRequest) -> Result<CustomerModel, RepositoryError> {
        let customer = sqlx::query_as::<_, CustomerModel>(
            r#"
            INSERT INTO customers (name, email, contact)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, contact
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.contact)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to create customer {}: {:?}", req.email, e);
            RepositoryError::from(e)
        })?;

        info!("✅ Created customer ID {} ({})", customer.id, customer.email);
        Ok(customer)
    }

    async fn update(
        &self,
        req: &UpdateCustomerRequest,
    ) -> Result<Option<CustomerModel>, RepositoryError> {
        let customer = sqlx::query_as::<_, CustomerModel>(
            r#"
            UPDATE customers
            SET name = $2,
                email = $3,
                contact = $4
            WHERE id = $1
            RETURNING id, name, email, contact
            "#,
        )
        .bind(req.id)
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.contact)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update customer {}: {:?}", req.id, e);
            RepositoryError::from(e)
        })?;

        if let Some(customer) = &customer {
            info!("🔄 Updated customer ID {}", customer.id);
        }
        Ok(customer)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        info!("🗑️ Deleting customer: {}", id);

        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
