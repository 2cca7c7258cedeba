//! Mock page source for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fetch::{FetchError, PageSource};

/// A configurable mock response for [`MockSource`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Serve this markup.
    Page(String),
    /// Simulate a non-success HTTP status.
    Status(u16),
    /// Simulate a transport failure (timeout, refused connection, ...).
    Error(String),
}

/// A hand-rolled mock implementing [`PageSource`] for tests.
pub struct MockSource {
    response: MockResponse,
    call_count: AtomicUsize,
}

impl MockSource {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Shorthand for a source that serves `html`.
    pub fn page(html: impl Into<String>) -> Self {
        Self::new(MockResponse::Page(html.into()))
    }

    /// Number of times [`PageSource::fetch`] was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl PageSource for MockSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let response = self.response.clone();
        Box::pin(async move {
            match response {
                MockResponse::Page(html) => Ok(html),
                MockResponse::Status(code) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::from_u16(code)
                        .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
                }),
                MockResponse::Error(message) => Err(FetchError::Other {
                    url: url.to_string(),
                    message,
                }),
            }
        })
    }
}
