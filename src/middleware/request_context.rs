use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Header carrying the caller's identity, as resolved by the auth front-end
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity used when the caller is not signed in
pub const GUEST_USER: &str = "guest";

const MAX_USER_ID_LEN: usize = 128;

/// Per-request identifiers stored in request extensions
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// Owner of the watchlist and history touched by this request
    pub user_id: String,
}

impl RequestContext {
    fn from_headers(headers: &HeaderMap) -> Self {
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        let user_id = headers
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| is_valid_user_id(s))
            .unwrap_or(GUEST_USER)
            .to_string();

        Self {
            request_id,
            user_id,
        }
    }
}

/// User IDs become store keys, so only plain identifier characters are accepted
fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_USER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
}

/// Middleware that resolves the [`RequestContext`] and echoes the request ID back
///
/// An incoming `x-request-id` UUID is reused, otherwise a new v4 UUID is
/// generated. A missing or malformed `x-user-id` means the guest user.
pub async fn request_context_middleware(mut request: Request, next: Next) -> Response {
    let context = RequestContext::from_headers(request.headers());
    let request_id = context.request_id;

    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id.to_string()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Creates the tracing span for a request, tagged with its request ID
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|context| context.request_id.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
