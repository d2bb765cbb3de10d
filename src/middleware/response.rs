use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that automatically adds success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize response data"
                    })),
                )
                    .into_response();
            }
        };

        let success = status.is_success();
        (status, Json(json!({ "success": success, "data": data_value }))).into_response()
    }
}

/// What a blog handler hands back: a view to render or a place to go next.
#[derive(Debug)]
pub enum Page {
    Render {
        template: &'static str,
        data: Value,
        flashes: Vec<String>,
    },
    Redirect(String),
}

impl Page {
    pub fn render(template: &'static str, data: Value) -> Self {
        Page::Render {
            template,
            data,
            flashes: Vec::new(),
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Page::Redirect(location.into())
    }

    /// Attach a user-facing message. No effect on redirects.
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        if let Page::Render { flashes, .. } = &mut self {
            flashes.push(message.into());
        }
        self
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Render {
                template,
                data,
                flashes,
            } => Json(json!({
                "success": true,
                "template": template,
                "data": data,
                "flashes": flashes,
            }))
            .into_response(),
            Page::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;

    #[test]
    fn redirect_is_see_other_with_location() {
        let response = Page::redirect("/").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[test]
    fn flashes_only_attach_to_renders() {
        let page = Page::render("blog/create.html", json!({})).with_flash("Title is required.");
        match page {
            Page::Render { flashes, .. } => assert_eq!(flashes, vec!["Title is required."]),
            Page::Redirect(_) => panic!("expected render"),
        }

        let page = Page::redirect("/").with_flash("ignored");
        assert!(matches!(page, Page::Redirect(ref location) if location == "/"));
    }

    #[test]
    fn render_is_ok() {
        let response = Page::render("blog/index.html", json!({ "posts": [] })).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
