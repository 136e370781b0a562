#![allow(dead_code)]

use news_api::services::seed::{self, SeedData};
use reqwest::Client;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Once,
};
use tokio::sync::{Mutex, MutexGuard};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
// Every test re-seeds the same tables.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var("RATE_LIMIT_ENABLED", "false");
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    _guard: MutexGuard<'static, ()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn patch(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .patch(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client.delete(self.url(path)).send().await.unwrap()
    }
}

pub fn fixture() -> SeedData {
    SeedData::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/seed.json"))
        .expect("Failed to load test fixture")
}

pub async fn spawn_app() -> TestApp {
    init_env();
    let guard = DB_LOCK.lock().await;

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        news_api::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    seed::run(&db, &fixture())
        .await
        .expect("Failed to seed test database");

    let app = news_api::routes::create_routes().layer(axum::extract::Extension(db.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
        _guard: guard,
    }
}
