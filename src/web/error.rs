use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::logging;

/// 網頁層的錯誤
#[derive(Debug)]
pub enum AppError {
    /// 500 - 頁面樣板產生失敗
    Render(askama::Error),
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Render(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Render(why) => {
                logging::error_file_async(format!("Failed to render page because {:?}", why));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while rendering the page.",
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_is_500() {
        let response = AppError::from(askama::Error::Fmt(std::fmt::Error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
