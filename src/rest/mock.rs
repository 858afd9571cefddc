//! Scripted backend for tests.

use std::cell::RefCell;

use super::{Backend, Response};
use crate::error::PmwError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(Response),
    Unreachable(String),
}

/// Answers requests from a script and records every request made.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    routes: Vec<(Method, String, Reply)>,
    requests: RefCell<Vec<Request>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on(
        mut self,
        method: Method,
        path: &str,
        response: Response,
    ) -> Self {
        self.set(method, path, response);
        self
    }

    pub(crate) fn unreachable(mut self, method: Method, path: &str) -> Self {
        self.routes.push((
            method,
            path.to_owned(),
            Reply::Unreachable("connection refused".to_owned()),
        ));
        self
    }

    /// Replace the scripted reply for `path` after construction.
    pub(crate) fn set(
        &mut self,
        method: Method,
        path: &str,
        response: Response,
    ) {
        self.routes.retain(|(m, p, _)| !(*m == method && p == path));
        self.routes
            .push((method, path.to_owned(), Reply::Respond(response)));
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn answer(
        &self,
        method: Method,
        path: &str,
        body: Option<&str>,
    ) -> Result<Response, PmwError> {
        self.requests.borrow_mut().push(Request {
            method,
            path: path.to_owned(),
            body: body.map(str::to_owned),
        });
        let reply = self
            .routes
            .iter()
            .find(|(m, p, _)| *m == method && p == path)
            .map(|(_, _, reply)| reply.clone());
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Unreachable(msg)) => Err(PmwError::Transport(msg)),
            None => Ok(Response {
                status: 404,
                status_text: "Not Found".to_owned(),
                body: String::new(),
            }),
        }
    }
}

impl Backend for MockBackend {
    fn get(&self, path: &str) -> Result<Response, PmwError> {
        self.answer(Method::Get, path, None)
    }

    fn post_json(&self, path: &str, body: &str) -> Result<Response, PmwError> {
        self.answer(Method::Post, path, Some(body))
    }
}
