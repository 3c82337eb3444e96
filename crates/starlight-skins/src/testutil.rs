//! Loopback HTTP fixtures for exercising the fetch path in tests.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

/// A one-shot HTTP server bound to a loopback port.
pub struct TestServer {
    addr: SocketAddr,
    /// Number of requests accepted so far.
    pub hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Base URL pointing at the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Install a subscriber once so `tracing` output from the crate shows up in
/// failing test logs.
fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Spawn a server answering every request with the given status and body,
/// optionally stalling before responding.
///
/// Must be called from within a tokio runtime.
pub fn spawn_server(
    status: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
    delay: Option<Duration>,
) -> TestServer {
    init_tracing();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let hits = Arc::new(AtomicUsize::new(0));
    let accepted = Arc::clone(&hits);

    tokio::spawn(async move {
        let listener = TcpListener::from_std(listener).unwrap();
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            accepted.fetch_add(1, Ordering::SeqCst);

            // Drain the request head; GETs fit in one read.
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let header = format!(
                "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes()).await;
            let _ = stream.write_all(&body).await;
            let _ = stream.shutdown().await;
        }
    });

    TestServer { addr, hits }
}

/// Encode a blank RGBA image of the given dimensions as PNG bytes.
pub fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::new(width, height);
    let mut bytes = std::io::Cursor::new(Vec::new());
    image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}
