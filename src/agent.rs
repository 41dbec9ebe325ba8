// HTTP transport to the agent service: one POST per generation call.

use std::fmt;

use serde_json::Value;

use crate::mode::Mode;

/// The one message users ever see for a failed call. The underlying cause
/// goes to the diagnostics log, never to the screen.
pub const GENERIC_ERROR: &str = "Failed to contact the agent. Please check your connection.";

#[derive(Debug)]
pub enum AgentError {
    /// Request could not be sent or no response was received.
    Network(String),
    /// A response arrived with a non-2xx status.
    Http(u16),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Network(e) => write!(f, "network error: {}", e),
            AgentError::Http(status) => write!(f, "agent returned HTTP {}", status),
        }
    }
}

#[derive(Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `payload` to the mode's endpoint and pull the mode's response key
    /// out of the JSON body. An absent key (or a 2xx body that is not JSON)
    /// yields the empty string; the caller renders that as the empty state.
    /// No retries, no caching, no timeout beyond the transport default.
    pub async fn generate(&self, mode: Mode, payload: Value) -> Result<String, AgentError> {
        let spec = mode.spec();
        let url = format!("{}{}", self.base_url, spec.endpoint);

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Http(status.as_u16()));
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("2xx response without a JSON body: {e}");
                return Ok(String::new());
            }
        };

        Ok(body
            .get(spec.response_key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormState;
    use crate::mode::build_payload;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    /// One-shot HTTP fixture: accepts a single connection, captures the raw
    /// request, answers with a canned response.
    fn canned_server(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            let _ = tx.send(request);
        });

        (format!("http://{addr}"), rx)
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn request_body(raw: &str) -> Value {
        let body = raw.split("\r\n\r\n").nth(1).unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_post_mode_hits_generate_post_with_declared_fields() {
        let (base, rx) = canned_server("200 OK", r#"{"final_content": "Hello"}"#);
        let client = AgentClient::new(&base);

        let mut form = FormState::new();
        form.set("topic", "AI Agents");
        let payload = build_payload(Mode::Post, &form).unwrap();

        let text = client.generate(Mode::Post, payload).await.unwrap();
        assert_eq!(text, "Hello");

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /generate-post HTTP/1.1"));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({
                "topic": "AI Agents",
                "platform": "LinkedIn",
                "tone": "Professional & Witty",
            })
        );
    }

    #[tokio::test]
    async fn test_ideas_mode_sends_integer_count() {
        let (base, rx) = canned_server("200 OK", r#"{"ideas": "1. something"}"#);
        let client = AgentClient::new(&base);

        let mut form = FormState::new();
        form.set("niche", "SaaS");
        form.set("count", "7");
        let payload = build_payload(Mode::Ideas, &form).unwrap();

        let text = client.generate(Mode::Ideas, payload).await.unwrap();
        assert_eq!(text, "1. something");

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /generate-ideas HTTP/1.1"));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({"niche": "SaaS", "count": 7})
        );
    }

    #[tokio::test]
    async fn test_plan_mode_sends_platform_array() {
        let (base, rx) = canned_server("200 OK", r#"{"strategy_and_plan": "plan"}"#);
        let client = AgentClient::new(&base);

        let mut form = FormState::new();
        form.set("niche", "Fitness");
        form.set("platforms", " LinkedIn ,, Twitter, ");
        let payload = build_payload(Mode::Plan, &form).unwrap();

        client.generate(Mode::Plan, payload).await.unwrap();

        let raw = rx.recv().unwrap();
        assert!(raw.starts_with("POST /generate-plan HTTP/1.1"));
        assert_eq!(
            request_body(&raw),
            serde_json::json!({
                "niche": "Fitness",
                "platforms": ["LinkedIn", "Twitter"],
                "duration": "1 Week",
            })
        );
    }

    #[tokio::test]
    async fn test_missing_response_key_is_empty_not_error() {
        let (base, _rx) = canned_server("200 OK", r#"{"unexpected": "shape"}"#);
        let client = AgentClient::new(&base);

        let text = client
            .generate(Mode::Post, serde_json::json!({"topic": "x"}))
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error() {
        let (base, _rx) = canned_server("500 Internal Server Error", r#"{"detail": "boom"}"#);
        let client = AgentClient::new(&base);

        let err = client
            .generate(Mode::Post, serde_json::json!({"topic": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Http(500)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = AgentClient::new(&format!("http://{addr}"));
        let err = client
            .generate(Mode::Post, serde_json::json!({"topic": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::Network(_)));
    }
}
