use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, PaginatorTrait,
    Set, Statement,
};
use serde_json::Value;
use tempfile::TempDir;

use server::config::{AppConfig, CorsConfig, DatabaseConfig, InspectionConfig, ServerConfig};
use server::entity::{
    asset, asset_check, check_group, check_group_template, check_item, check_item_template,
    location, product,
};
use server::state::AppState;

pub mod routes {
    pub const PASS_ALL_ASSETS: &str = "/api/pass-all-assets";
    pub const HEALTH: &str = "/api/health";
}

/// A running test server backed by a throwaway SQLite file.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("tecsim.db").display()
        );

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec!["*".to_string()],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig {
                url: db_url,
                max_connections: 1,
                min_connections: 1,
                connect_timeout_secs: 8,
                sync_schema: true,
                max_bind_params: 2,
            },
            inspection: InspectionConfig { chunk_size: 10 },
        };

        let db = server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn pass_all_assets(&self, location_id: i32, user_id: &str) -> TestResponse {
        self.post_json(
            routes::PASS_ALL_ASSETS,
            &serde_json::json!({ "locationId": location_id, "userId": user_id }),
        )
        .await
    }

    pub async fn seed_location(&self, id: i32, parent_id: Option<i32>) {
        location::ActiveModel {
            id: Set(id),
            parent_id: Set(parent_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed location");
    }

    pub async fn seed_product(&self, id: i32, category_id: i32) {
        product::ActiveModel {
            id: Set(id),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed product");
    }

    pub async fn seed_asset(&self, id: i32, product_id: i32, location_id: i32) {
        asset::ActiveModel {
            id: Set(id),
            product_id: Set(product_id),
            location_id: Set(location_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed asset");
    }

    pub async fn seed_group_template(&self, id: i32, name: &str, category_id: i32) {
        check_group_template::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed check group template");
    }

    pub async fn seed_item_template(&self, id: i32, name: &str, group_template_id: i32) {
        check_item_template::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            check_group_template_id: Set(group_template_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("Failed to seed check item template");
    }

    /// Run raw SQL against the test database, for schema tampering.
    pub async fn execute_sql(&self, sql: &str) {
        self.db
            .execute_raw(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
            .await
            .expect("Failed to execute SQL");
    }

    pub async fn asset_checks(&self) -> Vec<asset_check::Model> {
        asset_check::Entity::find()
            .all(&self.db)
            .await
            .expect("Failed to load asset checks")
    }

    pub async fn check_groups(&self) -> Vec<check_group::Model> {
        check_group::Entity::find()
            .all(&self.db)
            .await
            .expect("Failed to load check groups")
    }

    pub async fn check_item_count(&self) -> u64 {
        check_item::Entity::find()
            .count(&self.db)
            .await
            .expect("Failed to count check items")
    }
}
