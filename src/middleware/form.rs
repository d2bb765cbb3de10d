//! Form body extractor with JSON rejections

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// `Form<T>` whose rejections (wrong content type, undecodable body) come
/// back as a 400 in the usual error envelope instead of axum's plain text.
pub struct ValidForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected form body: {}", rejection.body_text());
            ApiError::bad_request(rejection.body_text())
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Title {
        #[serde(default)]
        title: String,
    }

    #[tokio::test]
    async fn urlencoded_body_is_decoded() {
        let request = Request::post("/create")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=hello"))
            .unwrap();

        let ValidForm(form) = ValidForm::<Title>::from_request(request, &()).await.unwrap();
        assert_eq!(form.title, "hello");
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = Request::post("/create").body(Body::from("title=hello")).unwrap();

        let err = match ValidForm::<Title>::from_request(request, &()).await {
            Ok(_) => panic!("form without a content type was accepted"),
            Err(err) => err,
        };
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json()["code"], "BAD_REQUEST");
    }
}
