//! Test harness with testcontainers for integration testing.
//!
//! Uses a shared Postgres container across all tests: the container and
//! migrations are initialized once on first use, then reused.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::auth::models::TEST_VERIFICATION_CODE;
use server_core::domains::auth::SessionStore;
use server_core::kernel::test_dependencies::{MockMediaStore, MockOtpService};
use server_core::kernel::{BaseMediaStore, BaseOtpService, ServerDeps};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

/// Global shared infrastructure - initialized once, reused by all tests.
static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init() avoids panicking if already set up.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Test harness that manages test infrastructure.
///
/// Each test gets a fresh pool and fresh mock dependencies, but reuses the
/// same database container.
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Deps with an OTP mock that accepts the standard test code and an
    /// in-memory media store.
    pub fn deps(&self) -> Arc<ServerDeps> {
        self.deps_with(
            Arc::new(MockOtpService::new(TEST_VERIFICATION_CODE)),
            Arc::new(MockMediaStore::new()),
        )
    }

    /// Deps with caller-supplied mocks (for failure injection).
    pub fn deps_with(
        &self,
        otp: Arc<dyn BaseOtpService>,
        media: Arc<dyn BaseMediaStore>,
    ) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            otp,
            media,
            Arc::new(SessionStore::new()),
            false,
        ))
    }

    /// Deps with the test-identifier bypass enabled.
    pub fn deps_with_test_identifiers(&self, otp: Arc<dyn BaseOtpService>) -> Arc<ServerDeps> {
        Arc::new(ServerDeps::new(
            self.db_pool.clone(),
            otp,
            Arc::new(MockMediaStore::new()),
            Arc::new(SessionStore::new()),
            true,
        ))
    }
}
