//! Local stand-in for the remote signing service.
//!
//! Serves every `POST` on an ephemeral port, records what the client sent
//! and answers through a per-test responder closure.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use warp::hyper::body::Bytes;
use warp::Filter;

/// One request as seen by the service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub raw_query: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Whether the multipart body carries `needle`.
    pub fn body_contains(&self, needle: &[u8]) -> bool {
        !needle.is_empty() && self.body.windows(needle.len()).any(|w| w == needle)
    }
}

pub struct MockSigningService {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockSigningService {
    /// Start the service on the current tokio runtime.
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, Vec<u8>) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let responder = Arc::new(responder);

        let route = warp::post()
            .and(warp::query::raw())
            .and(warp::header::optional::<String>("authorization"))
            .and(warp::header::optional::<String>("content-type"))
            .and(warp::body::bytes())
            .map(
                move |raw_query: String,
                      authorization: Option<String>,
                      content_type: Option<String>,
                      body: Bytes| {
                    let query = url::form_urlencoded::parse(raw_query.as_bytes())
                        .into_owned()
                        .collect();
                    let request = RecordedRequest {
                        raw_query,
                        query,
                        authorization,
                        content_type,
                        body: body.to_vec(),
                    };

                    let (status, reply) = (*responder)(&request);
                    recorded.lock().unwrap().push(request);

                    warp::reply::with_status(
                        reply,
                        warp::http::StatusCode::from_u16(status).unwrap(),
                    )
                },
            );

        let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Self { addr, requests }
    }

    /// Always answer `status` with `body`.
    pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::start(move |_| (status, body.clone()))
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/signtool", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}
