use ureq::Agent;

use crate::form::{RawResponse, Transport, TransportError};

/// Posts form payloads to a running server.
pub struct HttpTransport {
    base_url: String,
    agent: Agent,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: Agent::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, path: &str, body: &str) -> Result<RawResponse, TransportError> {
        let response = match self
            .agent
            .post(&self.url(path))
            .set("Content-Type", "application/json")
            .send_string(body)
        {
            Ok(response) => response,
            // error statuses still carry a body worth reading
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(TransportError(e.to_string())),
        };

        let status = response.status();
        let content_type = response.header("Content-Type").map(str::to_string);
        let body = response
            .into_string()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        assert_eq!(
            HttpTransport::new("http://localhost:8000/").url("/api/confirmar"),
            "http://localhost:8000/api/confirmar"
        );
        assert_eq!(
            HttpTransport::new("http://localhost:8000").url("/api/confirmar"),
            "http://localhost:8000/api/confirmar"
        );
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // port 9 (discard) is closed on any sane test host
        let transport = HttpTransport::new("http://127.0.0.1:9");
        let err = transport.post_json("/api/confirmar", "{}").unwrap_err();
        assert!(!err.0.is_empty());
    }
}
