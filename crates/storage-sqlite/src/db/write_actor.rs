//! Single-writer actor for all ledger mutations.
//!
//! Every write job in this crate funnels through one background task that
//! owns one database connection and runs jobs one at a time, each inside an
//! `IMMEDIATE` transaction. This is what makes the apply path linearizable:
//! two applies against the same article can never observe the same
//! pre-update stock value, because the second job does not start until the
//! first has committed or rolled back. Conflict errors therefore never reach
//! callers.

use super::DbPool;
use crate::errors::TxError;
use diesel::SqliteConnection;
use std::any::Any;
use stockbook_core::errors::Result;
use tokio::sync::{mpsc, oneshot};

// A write job: runs against the writer's connection, inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Boxed closures with type-erased return values; each job carries a
    // oneshot sender for its reply.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction: if it returns `Err`,
    /// everything it did is rolled back and nothing becomes observable.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns the writer actor: a background Tokio task holding one connection
/// from the pool and processing write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // Bounded channel; 1024 is an arbitrary size.
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            // TxError keeps typed core errors (NotFound, InsufficientStock)
            // intact across the transaction boundary instead of
            // stringifying them.
            let result = conn
                .immediate_transaction::<_, TxError, _>(|c| job(c).map_err(TxError::Core))
                .map_err(Into::into);

            // Ignore send failure: the requester may have been cancelled.
            let _ = reply_tx.send(result);
        }
        // rx.recv() returned None: all WriteHandles dropped, actor exits.
    });

    WriteHandle { tx }
}
