//! PostgreSQL test container for integration tests
//!
//! Each test starts its own container with migrations applied. Docker must be
//! available, so the tests using it are `#[ignore]`d by default:
//!
//! ```text
//! cargo test -p feiras-server -- --ignored
//! ```

#![allow(dead_code)]

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{core::IntoContainerPort, runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

/// PostgreSQL image tag used by the tests
pub const POSTGRES_TAG: &str = "16-alpine";

pub struct TestPostgres {
    // Dropping the container stops it
    container: ContainerAsync<Postgres>,
    pool: PgPool,
    connection_string: String,
}

impl TestPostgres {
    /// Start a new PostgreSQL container with migrations applied
    pub async fn start() -> Result<Self> {
        let container = Postgres::default()
            .with_tag(POSTGRES_TAG)
            .start()
            .await
            .context("Failed to start PostgreSQL container")?;

        let host = container
            .get_host()
            .await
            .context("Failed to get container host")?;
        let port = container
            .get_host_port_ipv4(5432.tcp())
            .await
            .context("Failed to get container port")?;

        let connection_string =
            format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let pool = PgPoolOptions::new()
            .max_connections(16)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&connection_string)
            .await
            .context("Failed to connect to PostgreSQL")?;

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            container,
            pool,
            connection_string,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn pool_clone(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

/// Header plus rows in the source file layout
pub const SAMPLE_CSV: &str = "\
ID,LONG,LAT,SETCENS,AREAP,CODDIST,DISTRITO,CODSUBPREF,SUBPREFE,REGIAO5,REGIAO8,NOME_FEIRA,REGISTRO,LOGRADOURO,NUMERO,BAIRRO,REFERENCIA
1,-46550164,-23558733,355030885000091,3550308005040,87,VILA FORMOSA,26,ARICANDUVA-FORMOSA-CARRAO,Leste,Leste 1,VILA FORMOSA,4041-0,RUA MARAGOJIPE,S/N,VL FORMOSA,TV RUA PRETORIA
2,-46574716,-23584852,355030893000035,3550308005042,95,VILA PRUDENTE,29,VILA PRUDENTE,Leste,Leste 1,PRACA SANTA HELENA,4045-2,RUA JOSE DOS REIS,909.000000,VL ZELINA,RUA OLIVEIRA GOUVEIA
3,-46605914,-23633123,355030833000022,3550308005221,41,JABAQUARA,12,JABAQUARA,Sul,Sul 1,JARDIM SAO JORGE,1016-8,RUA LUIS DE FRANCA JUNIOR,S/N,JD SAO JORGE,TRAV R FRANCISCO PAULA
";
