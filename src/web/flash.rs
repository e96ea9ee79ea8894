//! One-shot notices carried across a redirect in the `flash` cookie.

use axum::{
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use url::form_urlencoded;

use crate::application::{Notice, NoticeLevel};
use crate::utils::cookies::{build_cookie, expired_cookie, find_cookie};

pub const FLASH_COOKIE: &str = "flash";

const FLASH_MAX_AGE_SECS: u64 = 60;

pub fn encode(notice: &Notice) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("level", notice.level.as_str())
        .append_pair("message", &notice.message)
        .finish()
}

pub fn decode(raw: &str) -> Option<Notice> {
    let mut level = None;
    let mut message = None;
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "level" => level = NoticeLevel::parse(&value),
            "message" => message = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(Notice::new(level?, message?))
}

/// Reads the pending notice, if any.
pub fn take(headers: &HeaderMap) -> Option<Notice> {
    find_cookie(headers, FLASH_COOKIE).and_then(|raw| decode(&raw))
}

/// `Set-Cookie` value carrying `notice` to the next page.
pub fn cookie(notice: &Notice, secure: bool) -> String {
    build_cookie(FLASH_COOKIE, &encode(notice), Some(FLASH_MAX_AGE_SECS), secure)
}

/// Redirects with `303 See Other`, leaving `notice` for the next page.
pub fn redirect(to: &str, notice: Notice, secure: bool) -> Response {
    (
        AppendHeaders([(SET_COOKIE, cookie(&notice, secure))]),
        Redirect::to(to),
    )
        .into_response()
}

/// Renders a page and clears the flash cookie if a notice was shown.
pub fn render(page: impl IntoResponse, consumed: bool) -> Response {
    if consumed {
        (
            AppendHeaders([(SET_COOKIE, expired_cookie(FLASH_COOKIE))]),
            page,
        )
            .into_response()
    } else {
        page.into_response()
    }
}
