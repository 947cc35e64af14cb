//! Redirect policy and origin-host tracking.

use reqwest::{Method, StatusCode};
use url::Url;

/// Methods whose requests may be redirected.
pub const REDIRECTABLE_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::HEAD,
    Method::DELETE,
    Method::PUT,
];

pub fn is_redirectable(method: &Method) -> bool {
    REDIRECTABLE_METHODS.contains(method)
}

pub fn is_redirect_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Method for the next hop: 307/308 and HEAD keep the method, anything else
/// is retried as GET.
pub(crate) fn next_method(status: StatusCode, method: &Method) -> Method {
    let preserve = matches!(
        status,
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT
    );
    if preserve || *method == Method::HEAD {
        method.clone()
    } else {
        Method::GET
    }
}

/// Request-scoped state for one logical request and its redirect chain.
///
/// The original host is captured on the first redirect response, before the
/// destination is recomputed. Every later hop is compared against it.
#[derive(Debug, Default, Clone)]
pub struct RedirectContext {
    original_host: Option<String>,
}

impl RedirectContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the host of the request that received a redirect.
    ///
    /// Only the first call has an effect, so chained redirects keep the real origin.
    pub fn capture_original(&mut self, url: &Url) {
        if self.original_host.is_none() {
            self.original_host = url.host_str().map(str::to_ascii_lowercase);
        }
    }

    pub fn original_host(&self) -> Option<&str> {
        self.original_host.as_deref()
    }

    /// Whether credentials may be attached to a request for `target`.
    ///
    /// Before any redirect this is always true. After one, only targets on the
    /// captured host qualify; ports are not compared.
    pub fn allows_credentials(&self, target: &Url) -> bool {
        match &self.original_host {
            None => true,
            Some(original) => target
                .host_str()
                .is_some_and(|host| host.eq_ignore_ascii_case(original)),
        }
    }
}
