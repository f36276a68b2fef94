use crate::{
    abstract_trait::OrderRepositoryTrait,
    domain::requests::{CreateOrderRequest, FindAllOrders, UpdateOrderRequest},
    model::Order as OrderModel,
    repository::page_offset,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

#[derive(FromRow)]
struct OrderPageRow {
    #[sqlx(flatten)]
    order: OrderModel,
    total_count: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    db: ConnectionPool,
}

impl OrderRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn count(&self, customer_id: Option<i32>) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders o WHERE ($1::INT IS NULL OR o.customer_id = $1)",
        )
        .bind(customer_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count orders: {:?}", e);
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!("🔍 Fetching orders for customer filter: {:?}", req.customer_id);

        let limit = req.page_size as i64;
        let offset = page_offset(req.page, req.page_size);

        let rows = sqlx::query_as::<_, OrderPageRow>(
            r#"
            SELECT
                o.id,
                o.customer_id,
                o.item,
                o.amount,
                o.created_at,
                o.updated_at,
                COUNT(*) OVER() AS total_count
            FROM orders o
            WHERE ($1::INT IS NULL OR o.customer_id = $1)
            ORDER BY o.created_at DESC, o.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(req.customer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = match rows.first() {
            Some(row) => row.total_count,
            None if offset > 0 => self.count(req.customer_id).await?,
            None => 0,
        };
        let orders = rows.into_iter().map(|r| r.order).collect();

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, customer_id, item, amount, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("🧾 Fetching orders of customer {}", customer_id);

        sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT id, customer_id, item, amount, created_at, updated_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders of customer {}: {:?}", customer_id, e);
            RepositoryError::from(e)
        })
    }

    async fn create(&self, req: &CreateOrderRequest) -> Result<OrderModel, RepositoryError> {
        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (customer_id, item, amount, created_at, updated_at)
            VALUES ($1, $2, $3, current_timestamp, current_timestamp)
            RETURNING id, customer_id, item, amount, created_at, updated_at
            "#,
        )
        .bind(req.customer_id)
        .bind(&req.item)
        .bind(req.amount)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to create order for customer {}: {:?}",
                req.customer_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "✅ Created order ID {} for customer {}",
            order.id, order.customer_id
        );
        Ok(order)
    }

    async fn update(&self, req: &UpdateOrderRequest) -> Result<Option<OrderModel>, RepositoryError> {
        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET customer_id = $2,
                item = $3,
                amount = $4,
                updated_at = current_timestamp
            WHERE id = $1
            RETURNING id, customer_id, item, amount, created_at, updated_at
            "#,
        )
        .bind(req.id)
        .bind(req.customer_id)
        .bind(&req.item)
        .bind(req.amount)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update order ID {}: {:?}", req.id, e);
            RepositoryError::from(e)
        })?;

        if let Some(order) = &order {
            info!("🔄 Updated order ID {}", order.id);
        }
        Ok(order)
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        info!("🗑️ Deleting order: {}", id);

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
