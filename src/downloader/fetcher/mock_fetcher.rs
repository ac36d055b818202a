use std::cell::RefCell;

use super::{FileFetcher, Response};
use crate::error::FetchError;

pub struct MockFetcher {
    responses: RefCell<Vec<Result<Response, FetchError>>>,
    requested: RefCell<Vec<String>>,
}

impl FileFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        self.requested.borrow_mut().push(url.to_string());

        let mut responses = self.responses.borrow_mut();

        if responses.is_empty() {
            Err(FetchError::Transport("no mocked response left".to_string()))
        } else {
            responses.remove(0)
        }
    }
}

impl MockFetcher {
    pub fn new(responses: Vec<Result<Response, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.borrow().len()
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}
