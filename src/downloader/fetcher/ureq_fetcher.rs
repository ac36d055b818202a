use std::time::Duration;

use ureq::Error::{Status, Transport};

use super::{FileFetcher, Response};
use crate::config::REQUEST_TIMEOUT;
use crate::error::FetchError;

pub struct UReqFetcher {
    agent: ureq::Agent,
}

impl FileFetcher for UReqFetcher {
    fn fetch(&self, url: &str) -> Result<Response, FetchError> {
        let response = self.agent.get(url).call();

        match response {
            Ok(response) => {
                let status = response.status();
                let content_type = response.header("Content-Type").map(str::to_string);
                let content_length = response.header("Content-Length").map(str::to_string);

                Ok(Response {
                    status,
                    content_type,
                    content_length,
                    body: Box::new(response.into_reader()),
                })
            }

            Err(Status(code, _)) => Err(FetchError::Status {
                code,
                url: url.to_string(),
            }),

            Err(Transport(transport)) => Err(FetchError::Transport(transport.to_string())),
        }
    }
}

impl UReqFetcher {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// `timeout` bounds the connect and every individual read, not the whole transfer.
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();

        UReqFetcher { agent }
    }
}

impl Default for UReqFetcher {
    fn default() -> Self {
        Self::new()
    }
}
