//! Artifactory client with preemptive auth and redirect-safe credential handling.

use crate::auth::PreemptiveAuth;
use crate::config::TransportConfig;
use crate::error::{TransportError, TransportResult};
use crate::redirect::{RedirectContext, is_redirect_status, is_redirectable, next_method};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Relative path of the ping endpoint.
pub const PING_ENDPOINT: &str = "api/system/ping";

/// Response header carrying the artifact's SHA-256.
pub const SHA256_HEADER: &str = "X-Checksum-Sha256";

// ============================================================================
// Client
// ============================================================================

/// HTTP client bound to one Artifactory base URL.
///
/// The authentication scheme is fixed at construction.
#[derive(Debug, Clone)]
pub struct ArtifactoryClient {
    http: reqwest::Client,
    base_url: String,
    auth: PreemptiveAuth,
    max_redirects: usize,
}

impl ArtifactoryClient {
    pub fn new(config: TransportConfig) -> TransportResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::none());

        builder = match config.effective_proxy() {
            Some(proxy) => {
                let mut reqwest_proxy = reqwest::Proxy::all(proxy.proxy_url(false))
                    .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
                if let Some(password) = proxy.password().filter(|_| proxy.has_credentials()) {
                    reqwest_proxy =
                        reqwest_proxy.basic_auth(proxy.username(), password.expose_secret());
                }
                debug!(proxy = %proxy.proxy_url(false), "Using proxy");
                builder.proxy(reqwest_proxy)
            }
            None => builder.no_proxy(),
        };

        let http = builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        let auth = PreemptiveAuth::from_credentials(&config.credentials);
        debug!(base_url = %config.base_url, scheme = auth.scheme(), "Created Artifactory client");

        Ok(Self {
            http,
            base_url: config.base_url,
            auth,
            max_redirects: config.max_redirects,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn auth(&self) -> &PreemptiveAuth {
        &self.auth
    }

    /// Resolve a path against the base URL, ensuring exactly one leading slash.
    ///
    /// Percent-encoded segments in `path` are preserved as given.
    pub fn resolve(&self, path: &str) -> TransportResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// `GET api/system/ping`. Any non-2xx answer is an error.
    pub async fn ping(&self) -> TransportResult<String> {
        let response = self.send(Method::GET, PING_ENDPOINT).await?;
        let response = ensure_success(response)?;
        Ok(response.text().await?)
    }

    /// `GET <path>`. Returns the successful response for the caller to consume.
    pub async fn download(&self, path: &str) -> TransportResult<Response> {
        let response = self.send(Method::GET, path).await?;
        ensure_success(response)
    }

    /// `HEAD <path>`, returning the response headers.
    pub async fn head(&self, path: &str) -> TransportResult<HeaderMap> {
        let response = self.send(Method::HEAD, path).await?;
        let response = ensure_success(response)?;
        Ok(response.headers().clone())
    }

    /// Remote SHA-256 of an artifact, from a metadata-only request.
    ///
    /// Returns an empty string when the header is missing, e.g. stripped by a proxy.
    pub async fn remote_sha256(&self, path: &str) -> TransportResult<String> {
        let headers = self.head(path).await?;
        let sha256 = headers
            .get(SHA256_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if sha256.is_empty() {
            warn!(path = %path, "No {SHA256_HEADER} header in response");
        }
        Ok(sha256)
    }

    /// Stream `path` into `destination`.
    ///
    /// The body is written to a sibling `.part` file first and renamed over
    /// the destination once complete. The `.part` file never outlives a
    /// failed download. Returns the number of bytes written.
    pub async fn download_to_file(&self, path: &str, destination: &Path) -> TransportResult<u64> {
        let response = self.download(path).await?;
        let partial = partial_path(destination);
        let written = match write_body(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&partial, destination).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(io_error(destination, e));
        }
        debug!(path = %destination.display(), bytes = written, "Download complete");
        Ok(written)
    }

    // ========================================================================
    // Request execution
    // ========================================================================

    /// Send a request, following redirects manually.
    ///
    /// Credentials are attached only while the target host equals the host
    /// that received the first redirect.
    async fn send(&self, method: Method, path: &str) -> TransportResult<Response> {
        let mut url = self.resolve(path)?;
        let mut method = method;
        let mut context = RedirectContext::new();
        let mut hops = 0usize;

        loop {
            let mut request = self.http.request(method.clone(), url.clone());
            if context.allows_credentials(&url) {
                request = self.auth.apply(request);
            } else {
                debug!(url = %url, "Redirect changed host, not sending credentials");
            }

            let response = request.send().await?;
            let status = response.status();
            if !is_redirect_status(status) || !is_redirectable(&method) {
                return Ok(response);
            }

            if hops >= self.max_redirects {
                return Err(TransportError::TooManyRedirects {
                    url: url.to_string(),
                    max: self.max_redirects,
                });
            }
            hops += 1;

            context.capture_original(&url);
            let next = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|location| url.join(location).ok())
                .ok_or_else(|| TransportError::InvalidRedirect {
                    url: url.to_string(),
                    status: status.as_u16(),
                })?;

            debug!(from = %url, to = %next, status = status.as_u16(), "Following redirect");
            method = next_method(status, &method);
            url = next;
        }
    }
}

fn ensure_success(response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(TransportError::UnexpectedStatus {
        status: status.as_u16(),
        status_line: format!("{:?} {status}", response.version()),
        url: response.url().to_string(),
    })
}

fn io_error(path: &Path, source: std::io::Error) -> TransportError {
    TransportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

async fn write_body(response: Response, partial: &Path) -> TransportResult<u64> {
    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|e| io_error(partial, e))?;
    let mut written = 0u64;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| io_error(partial, e))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| io_error(partial, e))?;
    Ok(written)
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ArtifactoryClient {
        ArtifactoryClient::new(TransportConfig::new(base)).unwrap()
    }

    #[test]
    fn test_resolve_normalizes_leading_slash() {
        let client = client("https://acme.jfrog.io/artifactory/");
        assert_eq!(
            client.resolve("api/system/ping").unwrap().as_str(),
            "https://acme.jfrog.io/artifactory/api/system/ping"
        );
        assert_eq!(
            client.resolve("//jfrog-cli/file").unwrap().as_str(),
            "https://acme.jfrog.io/artifactory/jfrog-cli/file"
        );
    }

    #[test]
    fn test_resolve_keeps_percent_encoding() {
        let client = client("https://releases.jfrog.io/artifactory");
        let url = client
            .resolve("/jfrog-cli/v2-jf/%5BRELEASE%5D/jfrog-cli-linux-amd64/jf")
            .unwrap();
        assert!(url.as_str().contains("/v2-jf/%5BRELEASE%5D/"));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tools/jf")),
            PathBuf::from("/tools/jf.part")
        );
    }
}
