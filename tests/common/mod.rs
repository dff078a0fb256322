#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::thread;

use nba_game_digest_lambda::error::{DigestError, Result, ServiceError};
use nba_game_digest_lambda::model::game::Game;
use nba_game_digest_lambda::secrets::SecretStore;
use nba_game_digest_lambda::sns::Notifier;
use nba_game_digest_lambda::sportsdata::GameFeed;

/// In-memory parameter store that records every lookup.
#[derive(Default)]
pub struct FakeStore {
    pub values: HashMap<String, String>,
    pub deny: Option<String>,
    pub lookups: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn with(values: &[(&str, &str)]) -> Self {
        Self {
            values: values.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ..Default::default()
        }
    }

    /// Every lookup fails with the given error code.
    pub fn denying(code: &str) -> Self {
        Self { deny: Some(code.to_string()), ..Default::default() }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl SecretStore for FakeStore {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>> {
        self.lookups.lock().unwrap().push(name.to_string());
        if let Some(code) = &self.deny {
            return Err(DigestError::SecretStore(ServiceError::new(
                "ssm:GetParameter",
                Some(code),
                format!("User is not authorized to access parameter {}", name),
            )));
        }
        Ok(self.values.get(name).cloned())
    }
}

pub enum FeedOutcome {
    Games(Vec<Game>),
    Body(&'static str),
    Transport,
}

pub struct FakeFeed {
    pub outcome: FeedOutcome,
    pub urls: Mutex<Vec<String>>,
}

impl FakeFeed {
    pub fn new(outcome: FeedOutcome) -> Self {
        Self { outcome, urls: Mutex::new(Vec::new()) }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl GameFeed for FakeFeed {
    async fn fetch(&self, url: &str) -> Result<Vec<Game>> {
        self.urls.lock().unwrap().push(url.to_string());
        match &self.outcome {
            FeedOutcome::Games(games) => Ok(games.clone()),
            FeedOutcome::Body(body) => Ok(serde_json::from_str(body)?),
            FeedOutcome::Transport => Err(DigestError::Transport("connection refused".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub topic: String,
    pub body: String,
    pub subject: String,
}

#[derive(Default)]
pub struct FakeNotifier {
    pub reject: bool,
    pub sent: Mutex<Vec<Published>>,
}

impl FakeNotifier {
    pub fn rejecting() -> Self {
        Self { reject: true, ..Default::default() }
    }

    pub fn sent(&self) -> Vec<Published> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    async fn publish(&self, topic: &str, body: &str, subject: &str) -> Result<String> {
        if self.reject {
            return Err(DigestError::Publish(ServiceError::new(
                "sns:Publish",
                Some("NotFound"),
                "Topic does not exist",
            )));
        }
        self.sent.lock().unwrap().push(Published {
            topic: topic.to_string(),
            body: body.to_string(),
            subject: subject.to_string(),
        });
        Ok("msg-0001".to_string())
    }
}

pub fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// A request captured by [`serve_once`]: head (request line and headers) and body.
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

/// Serve exactly one HTTP response on a loopback port. Returns the base URL and
/// a receiver yielding the request that was answered.
pub fn serve_once(
    status_line: &'static str,
    headers: &'static [(&'static str, &'static str)],
    body: &'static str,
) -> (String, Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            let head_end = loop {
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break Some(pos + 4);
                }
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break None,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            };
            let Some(head_end) = head_end else { return };
            let head = String::from_utf8_lossy(&request[..head_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < head_end + content_length {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let req_body = String::from_utf8_lossy(&request[head_end..]).to_string();

            let mut response = format!("{}\r\n", status_line);
            for (name, value) in headers {
                response.push_str(&format!("{}: {}\r\n", name, value));
            }
            response.push_str(&format!("Content-Length: {}\r\nConnection: close\r\n\r\n{}", body.len(), body));
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(CapturedRequest { head, body: req_body });
        }
    });
    (format!("http://{}", addr), rx)
}

/// A loopback URL with nothing listening on it.
pub fn refused_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    format!("http://127.0.0.1:{}", port)
}
