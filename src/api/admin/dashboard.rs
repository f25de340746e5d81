use super::newsletter::csv_attachment;
use crate::api::errors::{blocking, error_response};
use crate::auth::AdminPrincipal;
use crate::db::{sales_csv, AnalyticsOperations, RepositoryError};
use crate::enums::admin::{DashboardResponse, DateRangeQuery};
use crate::services::sales::SalesWindow;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;

fn window_for(query: DateRangeQuery) -> SalesWindow {
    SalesWindow::resolve(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        Utc::now().date_naive(),
    )
}

#[utoipa::path(
    tag = "Admin",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Totals, daily sales, status mix and recent orders", body = DashboardResponse)
    ),
    summary = "Admin dashboard"
)]
#[get("/dashboard")]
pub(super) async fn view_dashboard(
    _admin: AdminPrincipal,
    analytics_ops: web::Data<AnalyticsOperations>,
    query: web::Query<DateRangeQuery>,
) -> impl Responder {
    let window = window_for(query.into_inner());
    let ops = analytics_ops.into_inner();
    let result = blocking(move || {
        Ok((
            ops.get_totals()?,
            ops.get_daily_sales(&window)?,
            ops.get_status_distribution()?,
            ops.get_recent_orders()?,
        ))
    })
    .await;

    match result {
        Ok((totals, daily_sales, status_distribution, recent_orders)) => {
            HttpResponse::Ok().json(DashboardResponse {
                success: true,
                message: None,
                start_date: window.start,
                end_date: window.end,
                totals,
                daily_sales,
                status_distribution,
                recent_orders,
            })
        }
        Err(e) => error_response("ADMIN: dashboard()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Non-cancelled orders in the window as a CSV attachment", body = String, content_type = "text/csv")
    ),
    summary = "Export sales"
)]
#[get("/export-sales")]
pub(super) async fn export_sales(
    admin: AdminPrincipal,
    analytics_ops: web::Data<AnalyticsOperations>,
    query: web::Query<DateRangeQuery>,
) -> impl Responder {
    let window = window_for(query.into_inner());
    let ops = analytics_ops.into_inner();
    let result = blocking(move || {
        let rows = ops.get_sales_rows(&window)?;
        sales_csv(&rows).map_err(|e| RepositoryError::WorkerError(e.to_string()))
    })
    .await;

    match result {
        Ok(body) => {
            debug!(
                "export_sales: admin {} exported {}..{}",
                admin.user_id, window.start, window.end
            );
            csv_attachment(
                format!(
                    "sales_report_{}_{}.csv",
                    window.start.format("%Y-%m-%d"),
                    window.end.format("%Y-%m-%d")
                ),
                body,
            )
        }
        Err(e) => error_response("ADMIN: export_sales()", &e),
    }
}
