use notification_service::config::{DatabaseConfig, NotificationConfig, ObservabilityConfig};
use notification_service::services::NotificationDb;
use notification_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: NotificationDb,
    pub database_url: String,
    // Held so the database file outlives the test.
    _db_dir: TempDir,
}

pub fn test_config(database_url: &str) -> NotificationConfig {
    NotificationConfig {
        // Use random port for testing (port 0)
        common: CoreConfig { port: 0 },
        database: DatabaseConfig {
            url: database_url.to_string(),
            max_connections: 5,
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        },
    }
}

pub fn database_url(dir: &TempDir) -> String {
    let path: PathBuf = dir.path().join("notifications.db");
    format!("sqlite://{}", path.display())
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let database_url = database_url(&db_dir);

        let app = Application::build(test_config(&database_url))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            database_url,
            _db_dir: db_dir,
        }
    }

    pub async fn send(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/notifications/send", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list(&self) -> serde_json::Value {
        let response = reqwest::Client::new()
            .get(format!("{}/notifications", self.address))
            .send()
            .await
            .expect("Failed to execute request");
        assert!(response.status().is_success());
        response.json().await.expect("Failed to parse JSON")
    }
}
