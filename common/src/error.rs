use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // === APPLICATION ERRORS ===
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "message": err_msg, "success": false })
            } else {
                serde_json::json!({ "message": "Internal server error", "success": false })
            }
        };

        let to_json = || serde_json::json!({ "message": self.to_string(), "success": false });

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
            AppError::Jwt(error) => {
                log::error!("JWT error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(to_json()),
            // duplicate resources answer 400, not 409: the frontend the
            // original service was written for only distinguishes 4xx vs 5xx
            AppError::Conflict(_) => HttpResponse::BadRequest().json(to_json()),
            AppError::NotFound(_) => HttpResponse::NotFound().json(to_json()),
            AppError::BadRequest(_) => HttpResponse::BadRequest().json(to_json()),

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&error.to_string()))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    async fn body_json(res: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(res.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn not_found_maps_to_404_envelope() {
        let res = AppError::NotFound("Jobs not found.".to_string()).to_http_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["message"], serde_json::json!("Jobs not found."));
    }

    #[actix_web::test]
    async fn conflict_maps_to_400() {
        let res = AppError::Conflict("You have already applied for this job.".to_string())
            .to_http_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unauthorized_maps_to_401() {
        let res = AppError::Unauthorized("User not authenticated".to_string()).to_http_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn internal_maps_to_500_and_hides_detail_in_release() {
        let res = AppError::Internal("pool exhausted".to_string()).to_http_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(false));
        if !cfg!(debug_assertions) {
            assert_eq!(body["message"], serde_json::json!("Internal server error"));
        }
    }
}
