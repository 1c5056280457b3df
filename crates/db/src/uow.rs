//! Explicit unit of work: one transaction per engine operation.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// A transaction scoped to exactly one engine operation.
///
/// Engine functions take `&mut UnitOfWork` and issue every read and write
/// through [`conn`](Self::conn). The caller commits only after the operation
/// returns `Ok`; dropping an uncommitted unit of work rolls it back, so an
/// early `?` return never leaves partial rows behind.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Connection bound to this transaction. Pass to repository methods.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    pub async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}
