use std::sync::Arc;
use std::time::Duration;

use holdem_domain::{Action, Chips, LegalAction, PlayerToken, TableError, TableId};
use holdem_engine::{HandRecord, PrivateView, PushEvent, TableConfig, TableView};
use platform_core::TableSection;
use tokio::sync::{broadcast, oneshot};
use tracing::info;

use crate::actor::{spawn_table, TableMsg};
use crate::error::ServiceError;
use crate::registry::{TableHandle, TableRegistry};

const TABLE_QUEUE_CAPACITY: usize = 64;

/// Translate the process-wide config section into the immutable per-table
/// snapshot the engine consumes.
#[must_use]
pub fn table_config_from(section: &TableSection) -> TableConfig {
    TableConfig {
        min_players: section.min_players,
        max_players: section.max_players,
        small_blind: Chips(section.small_blind),
        big_blind: Chips(section.big_blind),
        min_buy_in: Chips(section.min_buy_in),
        max_buy_in: Chips(section.max_buy_in),
        default_buy_in: Chips(section.default_buy_in),
        turn_timer: Duration::from_millis(section.turn_timer_ms),
        time_bank_seconds: section.time_bank_seconds,
        hand_start_delay: Duration::from_millis(section.hand_start_delay_ms),
        showdown_delay: Duration::from_millis(section.showdown_delay_ms),
        sit_out_auto_remove: Duration::from_millis(section.sit_out_auto_remove_ms),
        max_hand_history: section.max_hand_history,
        elo_k_factor: section.elo_k_factor,
        default_elo: section.default_elo,
    }
}

#[derive(Debug, Clone)]
pub struct JoinReply {
    pub token: PlayerToken,
    pub table_id: TableId,
    pub seat: usize,
    pub welcome: String,
}

/// The operations the transport layer calls. Routes every token to its table
/// actor; creates tables on demand when all existing ones are full.
pub struct LobbyService {
    registry: Arc<TableRegistry>,
    table_config: TableConfig,
}

impl LobbyService {
    #[must_use]
    pub fn new(section: &TableSection) -> Self {
        Self::with_config(table_config_from(section))
    }

    #[must_use]
    pub fn with_config(table_config: TableConfig) -> Self {
        Self {
            registry: Arc::new(TableRegistry::new()),
            table_config,
        }
    }

    #[must_use]
    pub fn registry(&self) -> Arc<TableRegistry> {
        Arc::clone(&self.registry)
    }

    /// Seat a new player, preferring existing tables with space. `table_type`
    /// is accepted for forward compatibility; every table currently runs the
    /// same cash-game profile.
    pub async fn join(
        &self,
        name: &str,
        buy_in: Option<Chips>,
        _table_type: Option<&str>,
    ) -> Result<JoinReply, ServiceError> {
        let buy_in = buy_in.unwrap_or(self.table_config.default_buy_in);
        let token = PlayerToken::new();

        for handle in self.registry.tables() {
            match self.join_table(&handle, name, buy_in, token).await {
                Err(ServiceError::Table(TableError::TableFull)) => continue,
                Err(err) => return Err(err),
                Ok(seat) => return Ok(self.join_reply(name, token, handle.id(), seat)),
            }
        }

        let handle = self.create_table();
        let seat = self.join_table(&handle, name, buy_in, token).await?;
        Ok(self.join_reply(name, token, handle.id(), seat))
    }

    pub async fn state(&self, token: PlayerToken) -> Result<PrivateView, ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::GetState { token, reply })
            .await
    }

    pub async fn action(
        &self,
        token: PlayerToken,
        action: Action,
    ) -> Result<Action, ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::Act {
            token,
            action,
            reply,
        })
        .await
    }

    pub async fn legal_actions(
        &self,
        token: PlayerToken,
    ) -> Result<Vec<LegalAction>, ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::GetLegalActions { token, reply })
            .await
    }

    /// Cash the player out. Their token is unregistered by the table actor.
    pub async fn leave(&self, token: PlayerToken) -> Result<Chips, ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::Leave { token, reply })
            .await
    }

    pub async fn sit_out(&self, token: PlayerToken) -> Result<(), ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::SitOut { token, reply })
            .await
    }

    pub async fn return_from_sit_out(&self, token: PlayerToken) -> Result<(), ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::ReturnFromSitOut { token, reply })
            .await
    }

    pub async fn rebuy(&self, token: PlayerToken, amount: Chips) -> Result<Chips, ServiceError> {
        let handle = self.route(&token)?;
        self.request(&handle, |reply| TableMsg::Rebuy {
            token,
            amount,
            reply,
        })
        .await
    }

    /// Transport lost all push channels for this player.
    pub async fn disconnected(&self, token: PlayerToken) -> Result<(), ServiceError> {
        let handle = self.route(&token)?;
        handle
            .sender()
            .send(TableMsg::Disconnected { token })
            .await
            .map_err(|_| ServiceError::TableUnavailable)
    }

    /// Public snapshots of every table.
    pub async fn tables(&self) -> Vec<TableView> {
        let mut views = Vec::new();
        for handle in self.registry.tables() {
            let (reply, rx) = oneshot::channel();
            if handle
                .sender()
                .send(TableMsg::GetPublic { reply })
                .await
                .is_ok()
            {
                if let Ok(view) = rx.await {
                    views.push(view);
                }
            }
        }
        views
    }

    pub async fn history(
        &self,
        table_id: Option<TableId>,
        limit: usize,
    ) -> Result<Vec<HandRecord>, ServiceError> {
        let handles = match table_id {
            Some(id) => vec![self.registry.table(&id).ok_or(ServiceError::UnknownTable)?],
            None => self.registry.tables(),
        };
        let mut records = Vec::new();
        for handle in handles {
            let (reply, rx) = oneshot::channel();
            if handle
                .sender()
                .send(TableMsg::GetHistory { limit, reply })
                .await
                .is_ok()
            {
                if let Ok(mut chunk) = rx.await {
                    records.append(&mut chunk);
                }
            }
        }
        Ok(records)
    }

    /// Subscribe to a table's push events.
    pub fn subscribe(
        &self,
        table_id: &TableId,
    ) -> Result<broadcast::Receiver<PushEvent>, ServiceError> {
        self.registry
            .table(table_id)
            .map(|handle| handle.subscribe())
            .ok_or(ServiceError::UnknownTable)
    }

    /// Subscribe to the table a token is seated at.
    pub fn subscribe_for(
        &self,
        token: &PlayerToken,
    ) -> Result<broadcast::Receiver<PushEvent>, ServiceError> {
        self.registry
            .table_for_token(token)
            .map(|handle| handle.subscribe())
            .ok_or(ServiceError::UnknownPlayer)
    }

    fn join_reply(
        &self,
        name: &str,
        token: PlayerToken,
        table_id: TableId,
        seat: usize,
    ) -> JoinReply {
        JoinReply {
            token,
            table_id,
            seat,
            welcome: format!("Welcome to the table, {name}. You have seat {seat}."),
        }
    }

    async fn join_table(
        &self,
        handle: &TableHandle,
        name: &str,
        buy_in: Chips,
        token: PlayerToken,
    ) -> Result<usize, ServiceError> {
        let name = name.to_string();
        self.request(handle, |reply| TableMsg::Join {
            name,
            buy_in,
            token,
            reply,
        })
        .await
    }

    fn create_table(&self) -> TableHandle {
        let handle = spawn_table(
            TableId::new(),
            self.table_config,
            Arc::clone(&self.registry),
            TABLE_QUEUE_CAPACITY,
        );
        info!(table_id = %handle.id(), "table created");
        self.registry.insert_table(handle.clone());
        handle
    }

    async fn request<T>(
        &self,
        handle: &TableHandle,
        build: impl FnOnce(oneshot::Sender<Result<T, ServiceError>>) -> TableMsg,
    ) -> Result<T, ServiceError> {
        let (reply, rx) = oneshot::channel();
        handle
            .sender()
            .send(build(reply))
            .await
            .map_err(|_| ServiceError::TableUnavailable)?;
        rx.await.map_err(|_| ServiceError::TableUnavailable)?
    }

    fn route(&self, token: &PlayerToken) -> Result<TableHandle, ServiceError> {
        self.registry
            .table_for_token(token)
            .ok_or(ServiceError::UnknownPlayer)
    }
}
