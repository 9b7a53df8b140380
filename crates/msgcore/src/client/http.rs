use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::{Network, ParsedContent, PendingOp};
use crate::model::channel::ChannelId;
use crate::model::message::{MessageId, RawMessage};

pub use reqwest::StatusCode;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("http error")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("request rejected with status {0}")]
    Rejected(StatusCode),
}

/// The collection endpoint of a channel's messages.
pub fn messages_base(channel_id: ChannelId) -> String {
    format!("/channels/{channel_id}/messages")
}

/// The endpoint of a single message, the target of deletes and edits.
pub fn message_endpoint(channel_id: ChannelId, message_id: MessageId) -> String {
    format!("{base}/{message_id}", base = messages_base(channel_id))
}

/// A [`Network`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct Http {
    client: Client,
    api_base: Url,
    user_agent: String,
    token: Option<String>,
}

impl Http {
    pub fn new(api_base: Url, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            user_agent,
            token: None,
        }
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resolves an endpoint path against the API base, keeping the base's
    /// own path (e.g. `/api/v9`).
    pub fn url_for(&self, endpoint: &str) -> Result<Url, Error> {
        let base = self.api_base.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{endpoint}"))?)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client
            .request(method, url)
            .header(USER_AGENT, &self.user_agent);

        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, token),
            None => builder,
        }
    }
}

impl Network for Http {
    fn delete(&self, endpoint: &str) -> PendingOp<'static, ()> {
        let req = self
            .url_for(endpoint)
            .map(|url| self.request(reqwest::Method::DELETE, url));

        Box::pin(async move {
            let resp = req?.send().await?;
            if !resp.status().is_success() {
                return Err(Error::Rejected(resp.status()));
            }
            Ok(())
        })
    }

    fn patch(&self, endpoint: &str, body: &ParsedContent) -> PendingOp<'static, RawMessage> {
        let req = self
            .url_for(endpoint)
            .map(|url| self.request(reqwest::Method::PATCH, url).json(body));

        Box::pin(async move {
            let resp = req?.send().await?;
            if !resp.status().is_success() {
                return Err(Error::Rejected(resp.status()));
            }
            Ok(resp.json::<RawMessage>().await?)
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    fn make_http() -> Http {
        let url = Url::parse("https://discord.com/api/v9").expect("failed to parse URL");
        Http::new(url, "msgcore tester".to_string())
    }

    #[test]
    fn test_message_endpoint() {
        assert_eq!(
            message_endpoint(ChannelId(10), MessageId(20)),
            "/channels/10/messages/20"
        );
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let http = make_http();
        let url = http
            .url_for(&message_endpoint(ChannelId(1), MessageId(2)))
            .expect("failed to build url");
        assert_eq!(url.as_str(), "https://discord.com/api/v9/channels/1/messages/2");
    }

    #[test]
    fn test_token() {
        let http = make_http();
        assert_eq!(http.token(), None);
        assert_eq!(http.with_token("meow").token(), Some("meow"));
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false
        };

        let length = head
            .lines()
            .find_map(|line| {
                let line = line.to_ascii_lowercase();
                let value = line.strip_prefix("content-length:")?;
                value.trim().parse::<usize>().ok()
            })
            .unwrap_or(0);

        body.len() >= length
    }

    /// Answers one request on a local port with `status` and `body`. The
    /// handle yields the request as received, lowercased.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind listener");
        let addr = listener.local_addr().expect("no local address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("failed to accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];

            while !request_complete(&request) {
                let n = socket.read(&mut chunk).await.expect("failed to read request");
                if n == 0 {
                    break
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                 content-length: {len}\r\nconnection: close\r\n\r\n{body}",
                len = body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("failed to write response");

            String::from_utf8_lossy(&request).to_ascii_lowercase()
        });

        let url = Url::parse(&format!("http://{addr}/api/v9")).expect("failed to parse URL");
        (url, handle)
    }

    #[tokio::test]
    async fn test_delete() {
        let (url, server) = serve_once("200 OK", "").await;
        let http = Http::new(url, "msgcore tester".to_string()).with_token("meow");

        http.delete(&message_endpoint(ChannelId(10), MessageId(20)))
            .await
            .expect("delete failed");

        let request = server.await.expect("server panicked");
        assert!(request.starts_with("delete /api/v9/channels/10/messages/20 http/1.1"), "{request}");
        assert!(request.contains("authorization: meow"), "{request}");
        assert!(request.contains("user-agent: msgcore tester"), "{request}");
    }

    #[tokio::test]
    async fn test_delete_rejected() {
        let (url, server) = serve_once("403 Forbidden", "").await;
        let http = Http::new(url, "msgcore tester".to_string());

        let err = http
            .delete(&message_endpoint(ChannelId(10), MessageId(20)))
            .await
            .expect_err("delete succeeded");
        assert!(matches!(err, Error::Rejected(StatusCode::FORBIDDEN)));

        let request = server.await.expect("server panicked");
        assert!(!request.contains("authorization:"), "{request}");
    }

    #[tokio::test]
    async fn test_patch() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"id": "20", "channel_id": "10", "type": 0, "content": "hi",
                "edited_timestamp": "2024-05-01T12:00:00Z"}"#,
        )
        .await;
        let http = Http::new(url, "msgcore tester".to_string()).with_token("meow");

        let revision = http
            .patch(&message_endpoint(ChannelId(10), MessageId(20)), &ParsedContent::plain("hi"))
            .await
            .expect("patch failed");
        assert_eq!(revision.id, MessageId(20));
        assert_eq!(revision.content.as_deref(), Some("hi"));
        assert!(revision.edited_timestamp.is_some());

        let request = server.await.expect("server panicked");
        assert!(request.starts_with("patch /api/v9/channels/10/messages/20 http/1.1"), "{request}");
        assert!(request.contains("content-type: application/json"), "{request}");
        assert!(request.ends_with(r#"{"content":"hi"}"#), "{request}");
    }

    #[tokio::test]
    async fn test_patch_rejected() {
        let (url, _server) = serve_once("500 Internal Server Error", r#"{"message": "oops"}"#).await;
        let http = Http::new(url, "msgcore tester".to_string());

        let err = http
            .patch(&message_endpoint(ChannelId(10), MessageId(20)), &ParsedContent::plain("hi"))
            .await
            .expect_err("patch succeeded");
        assert!(matches!(err, Error::Rejected(StatusCode::INTERNAL_SERVER_ERROR)));
    }
}
