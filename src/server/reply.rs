use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Response, StatusCode};

const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";
const CSV: &str = "text/csv; charset=utf-8";

/// Successful handler output.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn html(body: String) -> Self {
        Self { content_type: HTML, body }
    }

    pub fn text<S: Into<String>>(body: S) -> Self {
        Self {
            content_type: TEXT,
            body: body.into(),
        }
    }

    pub fn csv(body: String) -> Self {
        Self { content_type: CSV, body }
    }

    pub fn into_response(self, status: StatusCode) -> Response<Body> {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        response
    }
}
