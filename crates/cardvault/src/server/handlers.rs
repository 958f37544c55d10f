//! Axum request handlers for all service endpoints.
//!
//! Handlers log outcomes (brand, sizes, error kinds) but never card digits,
//! ciphertext, or key material.

use std::sync::Arc;

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    DecryptRequest, DecryptResponse, ErrorResponse, HealthResponse, UploadResponse,
    ValidateQuery, ValidateResponse,
};
use common::ServiceError;
use tracing::{debug, info, warn};

use super::state::AppState;
use crate::{card, crypto};

/// Multipart field carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// Content types accepted for uploads. `image/jpg` is not registered but
/// browsers and clients still send it.
const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Renders a [`ServiceError`] as its status code and JSON [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// `POST /upload`: recognise, extract, and encrypt a card number from an image.
///
/// Expects a multipart form with the image in the `image` field. The card
/// number is encrypted before it leaves this handler; only the blob and the
/// matched brand are returned.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart.map_err(|e| body_error(e.status(), e.body_text()))?;
    let image = read_image(multipart).await?;
    let image_bytes = image.len();

    // OCR is blocking; keep it off the async workers.
    let recognizer = Arc::clone(&state.recognizer);
    let text = tokio::task::spawn_blocking(move || recognizer.recognize(&image))
        .await
        .map_err(|e| {
            warn!(error = %e, image_bytes, "OCR task did not complete");
            ServiceError::Internal("text recognition task failed".into())
        })?
        .map_err(|e| {
            warn!(error = %e, image_bytes, "text recognition failed");
            ServiceError::Recognition
        })?;

    let Some(candidate) = card::extract(&text) else {
        info!(
            image_bytes,
            text_bytes = text.len(),
            "no card number found in recognised text"
        );
        return Err(ServiceError::NoCardNumber.into());
    };

    let brand = candidate.brand();
    let encrypted_card_number =
        crypto::encrypt(&candidate.digits(), &state.key).map_err(|e| {
            warn!(error = %e, "encryption failed");
            ServiceError::EncryptionFailure
        })?;

    info!(
        brand = %brand,
        image_bytes,
        match_offset = candidate.span().start,
        "card number extracted and encrypted"
    );
    Ok(Json(UploadResponse {
        encrypted_card_number,
        brand,
    }))
}

/// `GET /validate?cardNumber=…`: Luhn check and brand of a caller-supplied number.
///
/// Spaces and dashes are stripped before both checks.
pub async fn validate(
    query: Result<Query<ValidateQuery>, QueryRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Query(query) = query.map_err(|_| {
        ServiceError::BadRequest("missing cardNumber query parameter".into())
    })?;

    let valid = card::validate(&query.card_number);
    let brand = card::classify(&card::normalize(&query.card_number));

    debug!(valid, brand = %brand, "card number validated");
    Ok(Json(ValidateResponse { valid, brand }))
}

/// `POST /decrypt`: recover a card number from a blob issued by `/upload`.
///
/// Every failure, whether a malformed blob, a tampered one, or one sealed
/// under another key, produces the same `decryption_failed` response.
pub async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<DecryptRequest>, JsonRejection>,
) -> Result<Json<DecryptResponse>, ApiError> {
    // The rejection text can quote the payload, so only the status is logged.
    let Json(req) = body.map_err(|e| {
        warn!(status = %e.status(), "invalid decrypt request payload");
        body_error(e.status(), "invalid request payload".into())
    })?;

    let decrypted_card_number = crypto::decrypt(&req.ciphertext, &state.key).map_err(|_| {
        warn!(blob_len = req.ciphertext.len(), "decryption failed");
        ServiceError::DecryptionFailure
    })?;

    info!("card number decrypted");
    Ok(Json(DecryptResponse {
        decrypted_card_number,
    }))
}

/// `GET /health`: liveness check.
///
/// The key is loaded before the listener binds, so a responding server is ready.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Upload helpers
// ---------------------------------------------------------------------------

/// Pull the bytes of the `image` field out of a multipart body.
async fn read_image(mut multipart: Multipart) -> Result<Vec<u8>, ServiceError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        body_error(e.status(), format!("invalid multipart body: {}", e.body_text()))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default();
        if !is_allowed_image_type(content_type) {
            warn!(content_type, "rejected upload with disallowed content type");
            return Err(ServiceError::BadRequest(
                "invalid file type; only .png, .jpeg, or .jpg are allowed".into(),
            ));
        }

        let bytes = field.bytes().await.map_err(|e| {
            body_error(e.status(), format!("failed to read image: {}", e.body_text()))
        })?;
        return Ok(bytes.to_vec());
    }

    Err(ServiceError::BadRequest("no image uploaded".into()))
}

/// Map a body extractor failure to a [`ServiceError`], keeping the 413 that
/// [`axum::extract::DefaultBodyLimit`] produces.
fn body_error(status: StatusCode, message: String) -> ServiceError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PayloadTooLarge
    } else {
        ServiceError::BadRequest(message)
    }
}

/// Compare the media type, ignoring parameters and case, against the allow-list.
fn is_allowed_image_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    ALLOWED_IMAGE_TYPES
        .iter()
        .any(|allowed| essence.eq_ignore_ascii_case(allowed))
}
