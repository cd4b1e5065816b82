use async_trait::async_trait;
use ft_core::{ChatSender, Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fmt;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API client posting Markdown messages to one chat.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    bot_token: String,
    chat_id: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(bot_token: Option<String>, chat_id: Option<String>) -> Result<Self> {
        let bot_token = bot_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config("Telegram bot token is required".to_string()))?;
        let chat_id = chat_id
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::Config("Telegram chat id is required".to_string()))?;

        Ok(Self {
            client: Client::new(),
            bot_token,
            chat_id,
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("chat_id", &self.chat_id)
            .field("base_url", &self.base_url)
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("sendMessage"))
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
                "disable_web_page_preview": false
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Publish(format!("Telegram API error ({}): {}", status, body)));
        }

        let envelope: Envelope = response.json().await?;
        if !envelope.ok {
            return Err(Error::Publish(format!(
                "Telegram API error: {}",
                envelope.description.unwrap_or_else(|| "ok is false".to_string())
            )));
        }

        tracing::info!("📨 Posted to Telegram");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one request with a canned response; yields the raw request.
    async fn one_shot_server(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn client(base: &str) -> TelegramClient {
        TelegramClient::new(Some("123:abc".to_string()), Some("@falaktech".to_string()))
            .unwrap()
            .with_base_url(base)
    }

    #[test]
    fn test_requires_credentials() {
        assert!(matches!(
            TelegramClient::new(None, Some("@c".to_string())),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TelegramClient::new(Some("t".to_string()), Some("  ".to_string())),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_token() {
        let debug = format!("{:?}", client("http://localhost"));
        assert!(!debug.contains("123:abc"));
    }

    #[tokio::test]
    async fn test_send_message_posts_markdown() {
        let (base, server) = one_shot_server("200 OK", r#"{"ok":true,"result":{}}"#).await;

        client(&base).send_message("🔭 *Hello*").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /bot123:abc/sendMessage "));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["chat_id"], "@falaktech");
        assert_eq!(json["text"], "🔭 *Hello*");
        assert_eq!(json["parse_mode"], "Markdown");
        assert_eq!(json["disable_web_page_preview"], false);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base, server) = one_shot_server(
            "400 Bad Request",
            r#"{"ok":false,"description":"Bad Request: can't parse entities"}"#,
        )
        .await;

        let err = client(&base).send_message("*broken").await.unwrap_err();
        assert!(matches!(err, Error::Publish(ref m) if m.contains("can't parse entities")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ok_false_envelope_is_an_error() {
        let (base, server) = one_shot_server("200 OK", r#"{"ok":false,"description":"chat not found"}"#).await;

        let err = client(&base).send_message("hi").await.unwrap_err();
        assert!(matches!(err, Error::Publish(ref m) if m.contains("chat not found")));
        server.await.unwrap();
    }
}
