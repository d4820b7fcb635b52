//! # Draft Autosave
//!
//! Debounced persistence of the in-progress form.
//!
//! ## Timing
//! ```text
//!   update  update      update                       (quiet period)
//!     │       │           │◄──────────── debounce ────────────►│
//!     ▼       ▼           ▼                                    ▼
//!   ──●───────●───────────●────────────────────────────────────■── save_draft
//!     └─reset─┘└──reset───┘
//! ```
//! Every update cancels the pending timer and starts a new one. Only the
//! latest form is written, once, after `debounce` without further changes.
//! `flush` and `shutdown` write the pending form immediately and report
//! the write's outcome; a timer-driven write can only log it.
//!
//! ## Task Layout
//! ```text
//! ┌──────────────────┐   AutosaveCommand    ┌──────────────────────────────┐
//! │  AutosaveHandle  │ ───── mpsc ────────► │  DraftAutosaver::run         │
//! │  (clonable)      │ ◄──── oneshot ack ── │  select! { command, timer }  │
//! └──────────────────┘                      └──────────────┬───────────────┘
//!                                                          │ save_draft
//!                                                          ▼
//!                                                    ReceiptStore
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use rentslip_core::types::FormData;
use rentslip_db::{DbResult, KeyValueStore, ReceiptStore};

use crate::error::{AppError, AppResult};

/// Commands for the autosave task.
#[derive(Debug)]
enum AutosaveCommand {
    /// The form changed.
    Update(FormData),
    /// Write the pending form now.
    Flush(oneshot::Sender<AppResult<()>>),
    /// Write the pending form and stop.
    Shutdown(oneshot::Sender<AppResult<()>>),
}

/// Handle for feeding the autosave task.
#[derive(Debug, Clone)]
pub struct AutosaveHandle {
    cmd_tx: mpsc::Sender<AutosaveCommand>,
}

impl AutosaveHandle {
    /// Records a form change and restarts the quiet period.
    pub async fn update(&self, form: FormData) -> AppResult<()> {
        self.cmd_tx
            .send(AutosaveCommand::Update(form))
            .await
            .map_err(|_| AppError::AutosaveStopped)
    }

    /// Writes any pending change and waits for it.
    pub async fn flush(&self) -> AppResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(AutosaveCommand::Flush(ack_tx))
            .await
            .map_err(|_| AppError::AutosaveStopped)?;
        ack_rx.await.map_err(|_| AppError::AutosaveStopped)?
    }

    /// Writes any pending change, then stops the task.
    pub async fn shutdown(&self) -> AppResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.cmd_tx
            .send(AutosaveCommand::Shutdown(ack_tx))
            .await
            .map_err(|_| AppError::AutosaveStopped)?;
        ack_rx.await.map_err(|_| AppError::AutosaveStopped)?
    }
}

/// Debounced draft writer.
pub struct DraftAutosaver<S> {
    store: Arc<ReceiptStore<S>>,
    debounce: Duration,
}

impl<S: KeyValueStore + 'static> DraftAutosaver<S> {
    pub fn new(store: Arc<ReceiptStore<S>>, debounce: Duration) -> Self {
        DraftAutosaver { store, debounce }
    }

    /// Starts the task and returns a handle.
    pub fn start(self) -> AutosaveHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(64);

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        AutosaveHandle { cmd_tx }
    }

    async fn run(self, mut cmd_rx: mpsc::Receiver<AutosaveCommand>) {
        debug!(debounce_ms = self.debounce.as_millis() as u64, "Draft autosave started");

        let timer = sleep(self.debounce);
        tokio::pin!(timer);
        let mut pending: Option<FormData> = None;

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(AutosaveCommand::Update(form)) => {
                            pending = Some(form);
                            timer.as_mut().reset(Instant::now() + self.debounce);
                        }
                        Some(AutosaveCommand::Flush(ack)) => {
                            let result = self.commit(pending.take()).await;
                            let _ = ack.send(result.map_err(AppError::from));
                        }
                        Some(AutosaveCommand::Shutdown(ack)) => {
                            let result = self.commit(pending.take()).await;
                            let _ = ack.send(result.map_err(AppError::from));
                            break;
                        }
                        None => {
                            // Every handle dropped
                            if let Err(e) = self.commit(pending.take()).await {
                                warn!(error = %e, "Final draft autosave failed");
                            }
                            break;
                        }
                    }
                }
                _ = &mut timer, if pending.is_some() => {
                    if let Err(e) = self.commit(pending.take()).await {
                        warn!(error = %e, "Draft autosave failed");
                    }
                }
            }
        }

        info!("Draft autosave stopped");
    }

    async fn commit(&self, form: Option<FormData>) -> DbResult<()> {
        let Some(form) = form else {
            return Ok(());
        };

        if !form.has_data() {
            debug!("Form is empty, draft not saved");
            return Ok(());
        }

        self.store.save_draft(form.to_draft_fields()).await?;
        Ok(())
    }
}
