//! Transactions API endpoints.

use api_types::transaction::{TransactionCreate, TransactionKind, TransactionUpdate, TransactionView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> TransactionKind {
    match kind {
        engine::TransactionKind::Income => TransactionKind::Income,
        engine::TransactionKind::Expense => TransactionKind::Expense,
    }
}

fn engine_kind(kind: TransactionKind) -> engine::TransactionKind {
    match kind {
        TransactionKind::Income => engine::TransactionKind::Income,
        TransactionKind::Expense => engine::TransactionKind::Expense,
    }
}

fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        description: tx.description,
        amount_minor: tx.amount_minor,
        date: tx.date,
        kind: map_kind(tx.kind),
        category_id: tx.category_id,
        note: tx.note,
        created_at: tx.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions()
        .await?
        .into_iter()
        .map(map_transaction)
        .collect();
    Ok(Json(transactions))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .create_transaction(engine::NewTransaction {
            description: payload.description,
            amount_minor: payload.amount_minor,
            date: payload.date,
            kind: engine_kind(payload.kind),
            category_id: payload.category_id,
            note: payload.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state
        .engine
        .update_transaction(
            transaction_id,
            engine::TransactionUpdate {
                description: payload.description,
                amount_minor: payload.amount_minor,
                date: payload.date,
                kind: payload.kind.map(engine_kind),
                category_id: payload.category_id,
                note: payload.note,
            },
        )
        .await?;
    Ok(Json(map_transaction(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
