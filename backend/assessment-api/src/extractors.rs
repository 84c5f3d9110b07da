use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// JSON extractor whose rejections use the same `{message, status}` body as
/// every other API error. Schema violations (unknown fields, wrong types) keep
/// axum's 422; malformed JSON stays 400.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let status = rejection.status();
                let message = format!("Failed to parse JSON request body: {}", rejection.body_text());
                tracing::warn!("{}", message);
                let error_response = json!({
                    "message": message,
                    "status": status.as_u16()
                });
                Err((status, Json(error_response)).into_response())
            }
        }
    }
}
