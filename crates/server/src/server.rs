use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{budgets, categories, reports, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Builds the application router for a given engine.
///
/// Exposed so tests can drive the router directly without a listener.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/categories/{id}",
            axum::routing::put(categories::update).delete(categories::delete),
        )
        .route(
            "/api/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/api/transactions/{id}",
            axum::routing::put(transactions::update).delete(transactions::delete),
        )
        .route("/api/budgets", get(budgets::list).post(budgets::upsert))
        .route("/api/reports/budget-overview", get(reports::budget_overview))
        .route(
            "/api/reports/category-spending",
            get(reports::category_spending),
        )
        .route(
            "/api/reports/spending-comparison",
            get(reports::spending_comparison),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
