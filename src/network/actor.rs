//! Network actor - runs HTTP requests in Tokio async runtime

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::HttpAdapter;

/// Network actor that executes request commands through an [`HttpAdapter`]
pub struct NetworkActor<A: HttpAdapter> {
    adapter: Arc<A>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl<A: HttpAdapter> NetworkActor<A> {
    pub fn new(adapter: A, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            adapter: Arc::new(adapter),
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let adapter = Arc::clone(&self.adapter);

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %request.url, method = request.method.as_str(), "Executing request");
                                let start = Instant::now();
                                let result = adapter.request(request).await;
                                let time_ms = start.elapsed().as_millis() as u64;

                                let response = match result {
                                    Ok(resp) => {
                                        tracing::info!(id, status = resp.status, time_ms, "Request completed");
                                        NetworkResponse::Success {
                                            id,
                                            status: resp.status,
                                            data: resp.data,
                                            time_ms,
                                        }
                                    }
                                    Err(error) => {
                                        tracing::warn!(id, %error, time_ms, "Request failed");
                                        NetworkResponse::Failure { id, error, time_ms }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                    }
                }

                // Reap completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
