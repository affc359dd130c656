use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_products: i64,
}
