use crate::types::{ConnectionPool, StartupError};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// Applies pending schema migrations, returning how many ran.
pub async fn migrate(pool: &ConnectionPool) -> Result<usize, StartupError> {
    let mut conn = pool.get().await?;

    let report = embedded::migrations::runner().run_async(&mut *conn).await?;

    for migration in report.applied_migrations() {
        tracing::info!("applied migration {migration}");
    }
    Ok(report.applied_migrations().len())
}
