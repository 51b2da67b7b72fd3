//! TCP server for the quiz tool.
//!
//! Handles incoming connections and runs the per-connection command loop.
//! Uses tokio for async networking; every connection gets its own task and
//! its own transport, so sessions never share state.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::commands::{run_command, Command, Outcome, PROMPT};
use crate::session::SessionRng;
use crate::store::QuizStore;
use crate::transport::{LineTransport, Transport, TransportError};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7070,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables (`QUIZ_HOST`, `QUIZ_PORT`).
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("QUIZ_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("QUIZ_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7070);

        Self { host, port }
    }
}

/// Start the TCP server.
///
/// `ready_tx` receives the bound address once the listener is up; tests use
/// it together with port 0 to avoid fixed ports.
pub async fn run_server(
    config: ServerConfig,
    store: Arc<dyn QuizStore>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let bound = listener.local_addr()?;
    info!("quiz server listening on {bound}");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut connection_counter: u32 = 0;

    loop {
        let (socket, addr) = listener.accept().await?;
        connection_counter += 1;
        let connection_id = connection_counter;
        info!("client {connection_id} connected from {addr}");

        let store = Arc::clone(&store);
        tokio::spawn(async move {
            match handle_client(socket, connection_id, store).await {
                Ok(()) | Err(TransportError::Closed) => {}
                Err(e) => warn!("client {connection_id} error: {e}"),
            }
            info!("client {connection_id} disconnected");
        });
    }
}

/// Run the command loop for one connection until quit or disconnect.
async fn handle_client(
    socket: TcpStream,
    connection_id: u32,
    store: Arc<dyn QuizStore>,
) -> Result<(), TransportError> {
    let mut transport = LineTransport::new(socket);
    transport
        .write_line("Welcome to the quiz. Type 'help' to list commands.")
        .await?;

    loop {
        let line = transport.prompt_line(PROMPT).await?;
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        // Fresh seed per play invocation; fixed seeds are a test-only affair.
        let seed = SessionRng::from_entropy(connection_id).next_u32();
        match run_command(command, store.as_ref(), &mut transport, seed).await? {
            Outcome::Continue => {}
            Outcome::Quit => {
                transport.write_line("Goodbye!").await?;
                return Ok(());
            }
        }
    }
}
