//! HTTP GET with two calling conventions: body only, or the full response.
//!
//! One request per call. No retries, no timeout, no redirect following.
//! A non-2xx status is a normal response, not an error.

use async_trait::async_trait;
use url::Url;

use crate::types::{DataError, DataResult};

/// The parts of a response the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Media type from Content-Type, parameters stripped.
    pub content_type: Option<String>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can perform a GET.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, url: &Url) -> DataResult<HttpResponse>;
}

/// `reqwest`-backed client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("datakit/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for HttpClient {
    async fn fetch(&self, url: &Url) -> DataResult<HttpResponse> {
        let r = self.client.get(url.clone()).send().await?;

        let status = r.status().as_u16();
        let content_type = r
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(media_type);
        let body = r.text().await?;

        tracing::debug!(%url, status, bytes = body.len(), "GET");

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Parse `raw` as an absolute http(s) URL.
pub fn parse_url(raw: &str) -> DataResult<Url> {
    let url = Url::parse(raw).map_err(|e| DataError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DataError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

/// GET `url` and return only the body.
pub async fn get_body<C: HttpFetch + ?Sized>(client: &C, url: &str) -> DataResult<String> {
    Ok(get_response(client, url).await?.body)
}

/// GET `url` and return status, content type, and body.
pub async fn get_response<C: HttpFetch + ?Sized>(
    client: &C,
    url: &str,
) -> DataResult<HttpResponse> {
    let url = parse_url(url)?;
    client.fetch(&url).await
}

fn media_type(header: &str) -> Option<String> {
    let essence = header.split(';').next()?.trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct CannedFetch(HttpResponse);

    #[async_trait]
    impl HttpFetch for CannedFetch {
        async fn fetch(&self, _url: &Url) -> DataResult<HttpResponse> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_media_type() {
        assert_eq!(
            media_type("application/json"),
            Some("application/json".into())
        );
        assert_eq!(
            media_type("Text/HTML; charset=UTF-8"),
            Some("text/html".into())
        );
        assert_eq!(media_type(" ; charset=utf-8"), None);
    }

    #[test]
    fn test_parse_url() {
        assert!(parse_url("https://jsonplaceholder.typicode.com/todos/1").is_ok());
        assert_eq!(parse_url("not a url").unwrap_err().kind(), ErrorKind::Parse);
        assert_eq!(
            parse_url("ftp://example.com/x").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[tokio::test]
    async fn test_get_response_scenario() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let resp = get_response(&client, &format!("{}/ok", server.uri()))
            .await
            .unwrap();
        assert_eq!(
            resp,
            HttpResponse {
                status: 200,
                content_type: Some("application/json".into()),
                body: "{}".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_body_returns_body_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/todos/1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"id":1,"completed":false}"#,
                "application/json; charset=utf-8",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let body = get_body(&client, &format!("{}/todos/1", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, r#"{"id":1,"completed":false}"#);
    }

    #[tokio::test]
    async fn test_non_success_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let resp = get_response(&client, &format!("{}/gone", server.uri()))
            .await
            .unwrap();
        assert_eq!(resp.status, 404);
        assert!(!resp.is_success());
        assert_eq!(resp.body, "missing");
    }

    #[tokio::test]
    async fn test_redirect_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let resp = get_response(&client, &format!("{}/old", server.uri()))
            .await
            .unwrap();
        assert_eq!(resp.status, 301);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = HttpClient::new().unwrap();
        let err = get_body(&client, &format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn test_substitute_fetcher() {
        let fake = CannedFetch(HttpResponse {
            status: 200,
            content_type: Some("text/plain".into()),
            body: "hi".into(),
        });
        let url = "https://example.test/ok";
        let body = tokio_test::block_on(get_body(&fake, url)).unwrap();
        assert_eq!(body, "hi");

        let dynamic: &dyn HttpFetch = &fake;
        let resp = tokio_test::block_on(get_response(dynamic, url)).unwrap();
        assert_eq!(resp.status, 200);

        let err = tokio_test::block_on(get_body(dynamic, "example.test/ok")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
