// src/core/net.rs
// Blocking HTTP GET plus "local path or URL" text sources.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Net {
    client: Client,
}

impl Net {
    /// `timeout: None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn http_get(&self, url: &str) -> Result<String> {
        logd!("GET {url}");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }
        Ok(resp.text()?)
    }

    /// Fetch `location` over HTTP when it is a URL, else read it from disk.
    pub fn read_source(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            self.http_get(location)
        } else {
            Ok(std::fs::read_to_string(location)?)
        }
    }
}

pub fn is_remote(location: &str) -> bool {
    let lc = location.trim_start().to_ascii_lowercase();
    lc.starts_with("http://") || lc.starts_with("https://")
}

/// Join a base location (URL prefix or directory) and a file name.
pub fn join_location(base: &str, name: &str) -> String {
    let base = base.trim_end_matches(['/', '\\']);
    if is_remote(base) {
        format!("{base}/{name}")
    } else {
        std::path::Path::new(base).join(name).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://example.org/x.csv"));
        assert!(is_remote("HTTP://example.org"));
        assert!(!is_remote("/data/register"));
        assert!(!is_remote("register/people-0.csv"));
    }

    #[test]
    fn join_keeps_single_separator() {
        assert_eq!(join_location("https://h/data/", "people-0.csv"), "https://h/data/people-0.csv");
        assert!(join_location("reg", "people-a.csv").ends_with("people-a.csv"));
    }

    #[test]
    fn local_sources_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.csv");
        std::fs::write(&p, "a,b\n").unwrap();
        let net = Net::new(None).unwrap();
        assert_eq!(net.read_source(p.to_str().unwrap()).unwrap(), "a,b\n");
    }
}
