use std::time::Duration;

use holdem_engine::TimerFingerprint;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::actor::TableMsg;

enum Armed {
    /// Primary turn clock counting down for one prompt.
    Primary {
        fingerprint: TimerFingerprint,
        handle: JoinHandle<()>,
    },
    /// The prompt's primary clock expired; the time bank is ticking.
    Bank {
        fingerprint: TimerFingerprint,
        handle: JoinHandle<()>,
    },
}

impl Armed {
    fn fingerprint(&self) -> TimerFingerprint {
        match self {
            Self::Primary { fingerprint, .. } | Self::Bank { fingerprint, .. } => *fingerprint,
        }
    }

    fn abort(&self) {
        match self {
            Self::Primary { handle, .. } | Self::Bank { handle, .. } => handle.abort(),
        }
    }
}

/// One turn clock per table. Expiries are delivered as mailbox messages
/// carrying the prompt fingerprint, so a late firing against a prompt that
/// already resolved is discarded by the table, not raced against it.
pub struct TurnScheduler {
    tx: mpsc::Sender<TableMsg>,
    turn_timer: Duration,
    armed: Option<Armed>,
}

impl TurnScheduler {
    #[must_use]
    pub fn new(tx: mpsc::Sender<TableMsg>, turn_timer: Duration) -> Self {
        Self {
            tx,
            turn_timer,
            armed: None,
        }
    }

    /// Reconcile the armed clock with the table's current prompt: cancel
    /// anything stale, arm the primary timer for a fresh prompt, leave a
    /// matching clock (primary or bank) alone.
    pub fn sync(&mut self, current: Option<TimerFingerprint>) {
        match current {
            Some(fingerprint) => {
                if self
                    .armed
                    .as_ref()
                    .is_some_and(|armed| armed.fingerprint() == fingerprint)
                {
                    return;
                }
                self.cancel();
                let tx = self.tx.clone();
                let delay = self.turn_timer;
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(TableMsg::TurnTimerExpired { fingerprint }).await;
                });
                self.armed = Some(Armed::Primary {
                    fingerprint,
                    handle,
                });
            }
            None => self.cancel(),
        }
    }

    /// Switch the current prompt to a one-second time-bank countdown.
    pub fn engage_time_bank(&mut self, fingerprint: TimerFingerprint) {
        self.cancel();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx
                    .send(TableMsg::TimeBankTick { fingerprint })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        });
        self.armed = Some(Armed::Bank {
            fingerprint,
            handle,
        });
    }

    pub fn cancel(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.abort();
        }
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
