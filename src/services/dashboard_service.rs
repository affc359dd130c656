use crate::{
    database::{OrderStore, ProductStore, UserStore},
    error::Result,
    models::DashboardStats,
};

/// Independent reads; no snapshot consistency between the counts.
pub async fn dashboard_stats<S>(store: &S) -> Result<DashboardStats>
where
    S: OrderStore + ProductStore + UserStore + ?Sized,
{
    let total_orders = store.count_orders().await?;
    let total_revenue = store.total_revenue().await?;
    let total_customers = store.count_users().await?;
    let total_products = store.count_products().await?;

    Ok(DashboardStats {
        total_revenue,
        total_orders,
        total_customers,
        total_products,
    })
}
