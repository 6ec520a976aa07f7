pub mod health;
pub mod list;
pub mod create;
pub mod update;
pub mod delete;

pub use health::health_handler;
pub use list::list_handler;
pub use create::create_handler;
pub use update::update_handler;
pub use delete::delete_handler;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::build_app;
    use crate::config::Config;
    use crate::state::AppState;
    use axum::{body::Body, http::Request, http::StatusCode, Router};
    use serde_json::Value as JsonValue;
    use std::path::{Path, PathBuf};
    use tower::ServiceExt;

    pub const INDEX_HTML: &str = "<!doctype html><title>Vendors</title>";

    /// Router wired to a throwaway data file and static directory
    pub struct TestApp {
        pub router: Router,
        pub data_file: PathBuf,
        pub static_dir: PathBuf,
    }

    impl TestApp {
        pub async fn new() -> Self {
            Self::with_data_file(|root| root.join("data.json")).await
        }

        /// Data file inside a directory that is never created, so every
        /// write fails while reads see an empty collection.
        pub async fn with_missing_data_dir() -> Self {
            Self::with_data_file(|root| root.join("missing").join("data.json")).await
        }

        async fn with_data_file<F>(data_file: F) -> Self
        where
            F: FnOnce(&Path) -> PathBuf,
        {
            let root = std::env::temp_dir()
                .join(format!("vendor_store_test_{}", uuid::Uuid::new_v4()));
            let static_dir = root.join("public");
            tokio::fs::create_dir_all(&static_dir).await.unwrap();
            tokio::fs::write(static_dir.join("index.html"), INDEX_HTML).await.unwrap();

            let config = Config {
                service_port: 3000,
                service_host: "0.0.0.0".to_string(),
                data_file: data_file(&root),
                static_dir: static_dir.clone(),
            };
            let data_file = config.data_file.clone();

            Self {
                router: build_app(AppState::new(config)),
                data_file,
                static_dir,
            }
        }

        pub async fn send(
            &self,
            method: &str,
            uri: &str,
            body: Option<JsonValue>,
        ) -> (StatusCode, JsonValue) {
            let (status, bytes) = self.send_raw(method, uri, body).await;
            let json = if bytes.is_empty() {
                JsonValue::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }

        pub async fn send_raw(
            &self,
            method: &str,
            uri: &str,
            body: Option<JsonValue>,
        ) -> (StatusCode, Vec<u8>) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(json) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&json).unwrap()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, bytes.to_vec())
        }

        /// Raw contents of the data file, or `None` if it was never written.
        pub async fn stored(&self) -> Option<String> {
            tokio::fs::read_to_string(&self.data_file).await.ok()
        }

        pub async fn seed(&self, vendors: JsonValue) {
            let json = serde_json::to_string_pretty(&vendors).unwrap();
            tokio::fs::write(&self.data_file, json).await.unwrap();
        }
    }

    impl Drop for TestApp {
        fn drop(&mut self) {
            if let Some(root) = self.static_dir.parent() {
                let _ = std::fs::remove_dir_all(root);
            }
        }
    }
}
