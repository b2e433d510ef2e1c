//! Connection provider
//!
//! One fresh PostgreSQL connection per repository call, no pooling. A
//! [`Session`] owns that connection for the length of one statement and is
//! released on every exit path; statements run in autocommit mode.

use futures::future::BoxFuture;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use tracing::debug;

use crate::config::DbConfig;
use crate::error::{Result, StoreError};

type SqlxResult<T> = std::result::Result<T, sqlx::Error>;

/// Opens connections from an explicit [`DbConfig`]
#[derive(Clone)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
    target: String,
}

// PgConnectOptions would print the password.
impl std::fmt::Debug for ConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProvider")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl ConnectionProvider {
    pub fn new(config: &DbConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database)
            .application_name("stockctl");

        Self {
            options,
            target: config.target(),
        }
    }

    /// Open a new connection.
    ///
    /// # Errors
    ///
    /// Any connect or authentication failure is `StorageUnavailable`.
    pub async fn acquire(&self) -> Result<Session> {
        debug!(target_db = %self.target, "opening connection");
        let conn = PgConnection::connect_with(&self.options)
            .await
            .map_err(StoreError::unavailable)?;
        Ok(Session { conn })
    }

    /// Acquire a session, run one operation on it, and release it.
    ///
    /// The session is released whether the operation succeeds or fails.
    ///
    /// ```ignore
    /// let count = provider
    ///     .run(move |conn| Box::pin(async move { InventoryRepo::new(conn).archive(id).await }))
    ///     .await?;
    /// ```
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, SqlxResult<T>> + Send,
    {
        let mut session = self.acquire().await?;
        let result = op(session.connection()).await;
        session.release().await;
        result.map_err(StoreError::from)
    }
}

/// A single open connection, scoped to one repository call
pub struct Session {
    conn: PgConnection,
}

impl Session {
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Close the connection gracefully.
    ///
    /// A failed close is only logged: the statement already ran and the
    /// socket is dropped either way.
    pub async fn release(self) {
        if let Err(e) = self.conn.close().await {
            debug!(error = %e, "connection close failed");
        }
    }
}
