use std::collections::HashMap;
use std::sync::Arc;

use holdem_domain::{Action, Chips, Phase, PlayerToken, TableId};
use holdem_engine::{
    ActionOutcome, HandRecord, PrivateView, PushEvent, Table, TableConfig, TableView,
    TickOutcome, TimerFingerprint, TimerOutcome,
};
use holdem_domain::LegalAction;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::registry::{TableHandle, TableRegistry};
use crate::scheduler::TurnScheduler;

type Reply<T> = oneshot::Sender<Result<T, ServiceError>>;

/// Everything a table actor can be asked to do. Client calls, timer firings
/// and disconnect notifications all arrive through this one mailbox, which is
/// what serializes every state mutation for the table.
#[derive(Debug)]
pub enum TableMsg {
    Join {
        name: String,
        buy_in: Chips,
        token: PlayerToken,
        reply: Reply<usize>,
    },
    Leave {
        token: PlayerToken,
        reply: Reply<Chips>,
    },
    SitOut {
        token: PlayerToken,
        reply: Reply<()>,
    },
    ReturnFromSitOut {
        token: PlayerToken,
        reply: Reply<()>,
    },
    Rebuy {
        token: PlayerToken,
        amount: Chips,
        reply: Reply<Chips>,
    },
    Act {
        token: PlayerToken,
        action: Action,
        reply: Reply<Action>,
    },
    GetState {
        token: PlayerToken,
        reply: Reply<PrivateView>,
    },
    GetPublic {
        reply: oneshot::Sender<TableView>,
    },
    GetLegalActions {
        token: PlayerToken,
        reply: Reply<Vec<LegalAction>>,
    },
    GetHistory {
        limit: usize,
        reply: oneshot::Sender<Vec<HandRecord>>,
    },
    Disconnected {
        token: PlayerToken,
    },
    HandStartDue,
    FinishHandDue {
        hand_no: u64,
    },
    TurnTimerExpired {
        fingerprint: TimerFingerprint,
    },
    TimeBankTick {
        fingerprint: TimerFingerprint,
    },
    SitOutExpired {
        token: PlayerToken,
        epoch: u64,
    },
}

/// Spawn a table actor and return its handle. The actor owns the `Table`
/// exclusively; it dies when the last handle (and thus sender) is dropped.
pub fn spawn_table(
    id: TableId,
    config: TableConfig,
    registry: Arc<TableRegistry>,
    queue_capacity: usize,
) -> TableHandle {
    let (tx, rx) = mpsc::channel(queue_capacity);
    let (events_tx, _) = broadcast::channel(256);
    let handle = TableHandle::new(id, tx.clone(), events_tx.clone());

    let actor = TableActor {
        table: Table::new(id, config),
        rx,
        tx,
        events: events_tx,
        scheduler: TurnScheduler::new(handle.sender(), config.turn_timer),
        registry,
        config,
        start_scheduled: false,
        finish_scheduled: false,
        sit_out_epoch: 0,
        sit_out_timers: HashMap::new(),
    };
    tokio::spawn(actor.run());
    info!(table_id = %id, "table actor spawned");
    handle
}

struct TableActor {
    table: Table,
    rx: mpsc::Receiver<TableMsg>,
    tx: mpsc::Sender<TableMsg>,
    events: broadcast::Sender<PushEvent>,
    scheduler: TurnScheduler,
    registry: Arc<TableRegistry>,
    config: TableConfig,
    start_scheduled: bool,
    finish_scheduled: bool,
    sit_out_epoch: u64,
    sit_out_timers: HashMap<PlayerToken, (u64, JoinHandle<()>)>,
}

impl TableActor {
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            self.handle(msg);
            self.housekeep();
        }
        self.scheduler.cancel();
        for (_, (_, handle)) in self.sit_out_timers.drain() {
            handle.abort();
        }
        debug!(table_id = %self.table.id(), "table actor stopped");
    }

    fn handle(&mut self, msg: TableMsg) {
        match msg {
            TableMsg::Join {
                name,
                buy_in,
                token,
                reply,
            } => match self.table.seat_player(&name, buy_in, token) {
                Ok((seat, events)) => {
                    self.registry.register_token(token, self.table.id());
                    self.broadcast(events);
                    let _ = reply.send(Ok(seat));
                }
                Err(err) => {
                    let _ = reply.send(Err(err.into()));
                }
            },
            TableMsg::Leave { token, reply } => match self.table.remove_player(&token) {
                Ok((final_stack, outcome)) => {
                    self.registry.unregister_token(&token);
                    self.cancel_sit_out_timer(&token);
                    self.broadcast(outcome.events);
                    let _ = reply.send(Ok(final_stack));
                }
                Err(err) => {
                    let _ = reply.send(Err(err.into()));
                }
            },
            TableMsg::SitOut { token, reply } => match self.table.set_sit_out(&token) {
                Ok(outcome) => {
                    self.arm_sit_out_timer(token);
                    self.broadcast(outcome.events);
                    let _ = reply.send(Ok(()));
                }
                Err(err) => {
                    let _ = reply.send(Err(err.into()));
                }
            },
            TableMsg::ReturnFromSitOut { token, reply } => {
                match self.table.return_from_sit_out(&token) {
                    Ok(()) => {
                        self.cancel_sit_out_timer(&token);
                        let _ = reply.send(Ok(()));
                    }
                    Err(err) => {
                        let _ = reply.send(Err(err.into()));
                    }
                }
            }
            TableMsg::Rebuy {
                token,
                amount,
                reply,
            } => {
                let _ = reply.send(self.table.rebuy(&token, amount).map_err(Into::into));
            }
            TableMsg::Act {
                token,
                action,
                reply,
            } => match self.table.handle_action(&token, action) {
                Ok(outcome) => {
                    self.broadcast(outcome.events);
                    let _ = reply.send(Ok(action));
                }
                Err(err) => {
                    let _ = reply.send(Err(err.into()));
                }
            },
            TableMsg::GetState { token, reply } => {
                let _ = reply.send(self.table.state_for(&token).map_err(Into::into));
            }
            TableMsg::GetPublic { reply } => {
                let _ = reply.send(self.table.public_view());
            }
            TableMsg::GetLegalActions { token, reply } => {
                let _ = reply.send(self.table.legal_actions(&token).map_err(Into::into));
            }
            TableMsg::GetHistory { limit, reply } => {
                let _ = reply.send(self.table.history_recent(limit));
            }
            TableMsg::Disconnected { token } => {
                if let Ok(outcome) = self.table.mark_disconnected(&token) {
                    self.arm_sit_out_timer(token);
                    self.broadcast(outcome.events);
                }
            }
            TableMsg::HandStartDue => {
                self.start_scheduled = false;
                if let Some(events) = self.table.try_start_hand() {
                    info!(table_id = %self.table.id(), hand_no = self.table.hand_no(), "hand started");
                    self.broadcast(events);
                }
            }
            TableMsg::FinishHandDue { hand_no } => {
                self.finish_scheduled = false;
                if self.table.hand_no() == hand_no {
                    let summary = self.table.finish_hand();
                    for (seat, token) in &summary.removed {
                        debug!(table_id = %self.table.id(), seat, "vacated seat after hand");
                        self.registry.unregister_token(token);
                        self.cancel_sit_out_timer(token);
                    }
                    for token in &summary.sat_out {
                        self.arm_sit_out_timer(*token);
                    }
                    self.broadcast(summary.events);
                }
            }
            TableMsg::TurnTimerExpired { fingerprint } => {
                match self.table.on_turn_timer_expired(fingerprint) {
                    TimerOutcome::Stale => {}
                    TimerOutcome::TimeBankEngaged { seat, remaining, events } => {
                        debug!(table_id = %self.table.id(), seat, remaining, "time bank engaged");
                        self.broadcast(events);
                        self.scheduler.engage_time_bank(fingerprint);
                    }
                    TimerOutcome::Folded(outcome) => {
                        info!(table_id = %self.table.id(), seat = fingerprint.seat, "turn timed out");
                        self.apply_outcome(outcome);
                    }
                }
            }
            TableMsg::TimeBankTick { fingerprint } => {
                match self.table.on_time_bank_tick(fingerprint) {
                    TickOutcome::Stale => {}
                    TickOutcome::Counting { events, .. } => self.broadcast(events),
                    TickOutcome::Exhausted(outcome) => {
                        info!(table_id = %self.table.id(), seat = fingerprint.seat, "time bank exhausted");
                        self.apply_outcome(outcome);
                    }
                }
            }
            TableMsg::SitOutExpired { token, epoch } => {
                let armed = self
                    .sit_out_timers
                    .get(&token)
                    .is_some_and(|(armed_epoch, _)| *armed_epoch == epoch);
                if !armed {
                    return;
                }
                self.sit_out_timers.remove(&token);
                match self.table.remove_player(&token) {
                    Ok((final_stack, outcome)) => {
                        info!(table_id = %self.table.id(), stack = %final_stack, "idle sit-out removed");
                        self.registry.unregister_token(&token);
                        self.broadcast(outcome.events);
                    }
                    Err(err) => warn!(table_id = %self.table.id(), error = %err, "sit-out removal failed"),
                }
            }
        }
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        self.broadcast(outcome.events);
    }

    fn broadcast(&self, events: Vec<PushEvent>) {
        for event in events {
            // Send only fails with zero subscribers, which is fine.
            let _ = self.events.send(event);
        }
    }

    /// Runs after every message: reconcile timers and schedule the delayed
    /// transitions (hand teardown, next hand start) as future mailbox
    /// messages.
    fn housekeep(&mut self) {
        self.scheduler.sync(self.table.current_fingerprint());

        if self.table.phase() == Phase::Showdown && !self.finish_scheduled {
            self.finish_scheduled = true;
            let tx = self.tx.clone();
            let hand_no = self.table.hand_no();
            let delay = self.config.showdown_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(TableMsg::FinishHandDue { hand_no }).await;
            });
        }

        if self.table.phase() == Phase::Waiting
            && self.table.can_start_hand()
            && !self.start_scheduled
        {
            self.start_scheduled = true;
            let tx = self.tx.clone();
            let delay = self.config.hand_start_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(TableMsg::HandStartDue).await;
            });
        }
    }

    fn arm_sit_out_timer(&mut self, token: PlayerToken) {
        self.cancel_sit_out_timer(&token);
        if self.table.find_seat(&token).is_none() {
            return;
        }
        self.sit_out_epoch += 1;
        let epoch = self.sit_out_epoch;
        let tx = self.tx.clone();
        let delay = self.config.sit_out_auto_remove;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TableMsg::SitOutExpired { token, epoch }).await;
        });
        self.sit_out_timers.insert(token, (epoch, handle));
    }

    fn cancel_sit_out_timer(&mut self, token: &PlayerToken) {
        if let Some((_, handle)) = self.sit_out_timers.remove(token) {
            handle.abort();
        }
    }
}
