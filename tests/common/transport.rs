use std::{
    cell::{Cell, RefCell},
    io,
};

use dzclient::{LoadTestRequest, Response, Transport, prelude::*};
use reqwest::{StatusCode, header::HeaderMap};

/// Records every request and answers with a fixed status.
#[derive(Debug)]
pub struct RecordingTransport {
    pub requests: RefCell<Vec<LoadTestRequest>>,
    pub status: StatusCode,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub fn with_status(status: StatusCode) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            status,
        }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.body.clone())
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &LoadTestRequest) -> Result<Response> {
        self.requests.borrow_mut().push(request.clone());
        Ok(Response {
            status: self.status,
            headers: HeaderMap::new(),
            body: format!("accepted {}", self.requests.borrow().len()),
        })
    }
}

/// Succeeds for the first `fail_at` sends, then fails every send.
#[derive(Debug)]
pub struct FailingTransport {
    pub fail_at: usize,
    pub attempts: Cell<usize>,
}

impl FailingTransport {
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            attempts: Cell::new(0),
        }
    }
}

impl Transport for FailingTransport {
    fn send(&self, _request: &LoadTestRequest) -> Result<Response> {
        let attempt = self.attempts.get();
        self.attempts.set(attempt + 1);
        if attempt >= self.fail_at {
            return Err(Error::IO(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
        })
    }
}
