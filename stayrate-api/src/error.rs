use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stayrate_core::{BoxError, CatalogError, InventoryError, QuoteError};

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Quote(QuoteError),
    Inventory(InventoryError),
    Catalog(CatalogError),
    Storage(BoxError),
    Anyhow(anyhow::Error),
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        Self::Quote(err)
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        Self::Inventory(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Quote(err) => {
                let status = match &err {
                    QuoteError::RoomTypeNotFound(_) => StatusCode::NOT_FOUND,
                    QuoteError::InvalidStayRange(_) => StatusCode::BAD_REQUEST,
                    QuoteError::Storage(_) => {
                        tracing::error!("quote storage error: {err:?}");
                        return internal_error();
                    }
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                let details = match &err {
                    QuoteError::IncompleteRateCoverage { missing_dates } => {
                        Some(json!({ "missing_dates": missing_dates }))
                    }
                    _ => None,
                };
                (status, err.code(), err.to_string(), details)
            }
            AppError::Inventory(err) => {
                let status = match &err {
                    InventoryError::Insufficient { .. } => StatusCode::CONFLICT,
                    InventoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                    InventoryError::CounterInvariant { .. } => StatusCode::BAD_REQUEST,
                    InventoryError::Storage(_) => {
                        tracing::error!("inventory storage error: {err:?}");
                        return internal_error();
                    }
                };
                (status, err.code(), err.to_string(), None)
            }
            AppError::Catalog(err) => {
                let status = match &err {
                    CatalogError::OverlappingSeasons { .. } => StatusCode::CONFLICT,
                    CatalogError::IncompleteDailyRates { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                    CatalogError::Storage(_) => {
                        tracing::error!("catalog storage error: {err:?}");
                        return internal_error();
                    }
                };
                let details = match &err {
                    CatalogError::IncompleteDailyRates { missing_dates } => {
                        Some(json!({ "missing_dates": missing_dates }))
                    }
                    _ => None,
                };
                (status, err.code(), err.to_string(), details)
            }
            AppError::Storage(err) => {
                tracing::error!("storage error: {err:?}");
                return internal_error();
            }
            AppError::Anyhow(err) => {
                tracing::error!("internal error: {err:?}");
                return internal_error();
            }
        };

        let mut body = json!({
            "code": code,
            "error": message,
        });
        if let (Some(obj), Some(details)) = (body.as_object_mut(), details) {
            obj.insert("details".to_string(), details);
        }

        (status, Json(body)).into_response()
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code": "INTERNAL_ERROR",
            "error": "Internal Server Error",
        })),
    )
        .into_response()
}
