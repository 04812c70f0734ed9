//! Server lifecycle

use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::HomepageConfig;
use crate::error::HomepageError;
use crate::routes::{AppState, router};

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: HomepageConfig, state: AppState) -> Result<(), HomepageError> {
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| HomepageError::Bind {
            addr: config.bind,
            source,
        })?;

    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), HomepageError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "Homepage listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Homepage stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        warn!(error = %e, "Failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use linkfolio_core::{Document, InMemoryDocumentStore, ProfileLoader, USERS_COLLECTION};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn state() -> AppState {
        let store = InMemoryDocumentStore::new();
        let fields = json!({"name": "Erin"}).as_object().cloned().unwrap();
        store.insert_document(USERS_COLLECTION, Document::new("erin", fields));
        AppState::new(ProfileLoader::new(Arc::new(store)))
    }

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let server = tokio::spawn(serve_on(listener, state(), async move {
            let _ = stopped.await;
        }));

        let response = get(addr, "/erin").await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("Erin"));

        let response = get(addr, "/ghost").await;
        assert!(response.starts_with("HTTP/1.1 404"));

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = HomepageConfig::default().with_bind(taken.local_addr().unwrap());

        let err = serve(config, state()).await.unwrap_err();
        assert!(matches!(err, HomepageError::Bind { .. }));
    }
}
