use serde::Deserialize;

use super::error::Error;

#[derive(Debug, thiserror::Error)]
#[error("{status_code} status code")]
pub struct ServerError {
    pub status_code: u16,
}

pub fn check_status(res: &reqwest::Response) -> Result<(), ServerError> {
    let status = res.status();
    if !status.is_success() {
        return Err(ServerError {
            status_code: status.as_u16(),
        });
    }
    Ok(())
}

/// Error body as the backend sends it. Only `message` is used; the status
/// always comes from the response itself.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: Option<Message>,
    #[allow(dead_code)]
    status_code: Option<u16>,
}

/// Validation failures arrive as a list of messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Message {
    One(String),
    Many(Vec<String>),
}

impl From<Message> for String {
    fn from(val: Message) -> Self {
        match val {
            Message::One(message) => message,
            Message::Many(messages) => messages.join(","),
        }
    }
}

/// Turns a non-2xx response into an [`Error::Http`].
pub async fn error_from_response(res: reqwest::Response) -> Error {
    let status = res.status();
    let bytes = res.bytes().await.unwrap_or_default();
    let message = match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => body.message.map(String::from),
        Err(_) => status.canonical_reason().map(str::to_owned),
    };
    let message = message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()));

    Error::Http {
        message,
        status: status.as_u16(),
    }
}

/// Auth endpoints never trigger a refresh, or a failing refresh would loop.
pub fn is_auth_endpoint(path: &str) -> bool {
    path.contains("/auth/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .unwrap()
            .message
            .map(String::from)
    }

    #[test]
    fn message_lists_are_comma_joined() {
        assert_eq!(
            decoded_message(r#"{"statusCode":400,"message":["email must be an email","password too short"]}"#)
                .as_deref(),
            Some("email must be an email,password too short")
        );
        assert_eq!(
            decoded_message(r#"{"statusCode":500,"message":"boom"}"#).as_deref(),
            Some("boom")
        );
        assert_eq!(decoded_message(r#"{"statusCode":500}"#), None);
    }

    #[test]
    fn detects_auth_endpoints() {
        assert!(is_auth_endpoint("/auth/login"));
        assert!(is_auth_endpoint("/auth/refresh"));
        assert!(!is_auth_endpoint("/users"));
        assert!(!is_auth_endpoint("/authors"));
    }
}
