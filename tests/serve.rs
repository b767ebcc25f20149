//! Live-server tests: bind a real listener and talk to it over HTTP.

use std::sync::Arc;
use std::time::Duration;

use routetree::config::ServerConfig;
use routetree::demo::DemoKind;
use routetree::{HttpServer, Shutdown};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_server_serves_demo_and_shuts_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();
    config.routes.demo = DemoKind::Composition;
    config.routes.print_table = true;

    let shutdown = Arc::new(Shutdown::new());
    let server = HttpServer::new(config);
    let handle = tokio::spawn(server.run(listener, shutdown.clone()));

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let res = client
        .get(format!("{base}/api/v1/foo/qux/42"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "QuxHandler by ID 42");

    let res = client
        .delete(format!("{base}/api/v1/bar/baz/9"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "DeleteBazHandler by ID");

    let res = client.get(format!("{base}/nope")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_server_started_after_trigger_exits() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

    let shutdown = Arc::new(Shutdown::new());
    shutdown.trigger();

    let server = HttpServer::new(ServerConfig::default());
    let result = tokio::time::timeout(Duration::from_secs(5), server.run(listener, shutdown))
        .await
        .expect("server did not stop");
    assert!(result.is_ok());
}
