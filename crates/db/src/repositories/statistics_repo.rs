//! Aggregate queries for the admin dashboard.

use sqlx::PgExecutor;

use crate::models::statistics::Statistics;

pub struct StatisticsRepo;

impl StatisticsRepo {
    pub async fn collect<'e>(executor: impl PgExecutor<'e>) -> Result<Statistics, sqlx::Error> {
        sqlx::query_as::<_, Statistics>(
            "SELECT
                p.total AS total_projects,
                p.available AS available_projects,
                p.requested AS requested_projects,
                p.construction AS in_progress_projects,
                d.total AS total_documents,
                d.pending AS pending_documents,
                d.approved AS approved_documents,
                d.rejected AS rejected_documents,
                p.revenue AS total_revenue,
                p.average_price AS average_project_price
             FROM (
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'available') AS available,
                    COUNT(*) FILTER (WHERE status = 'requested') AS requested,
                    COUNT(*) FILTER (WHERE status = 'construction') AS construction,
                    COALESCE(SUM(price) FILTER (WHERE status = 'construction'), 0)::DOUBLE PRECISION
                        AS revenue,
                    COALESCE(AVG(price), 0)::DOUBLE PRECISION AS average_price
                FROM projects
             ) p
             CROSS JOIN (
                SELECT
                    COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                    COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                    COUNT(*) FILTER (WHERE status = 'rejected') AS rejected
                FROM documents
             ) d",
        )
        .fetch_one(executor)
        .await
    }
}
