use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

/// HTML page plus any `Set-Cookie` values queued during the request.
pub fn html_response_with_cookies(markup: Markup, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8");
    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie);
    }
    builder
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
