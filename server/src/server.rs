use tokio::sync::mpsc::{channel, Sender};
use tokio::sync::oneshot;

use interview_system::{
    Language, Session, SessionId, SessionStore, SessionUpdate, StoreError, Timestamp, User,
    UserId,
};

use crate::error::ApiError;

pub type Reply<T> = oneshot::Sender<T>;

/// Requests handled by the store task. Each carries the channel its answer
/// goes back on.
#[derive(Debug)]
pub enum StoreCommand {
    CreateSession {
        language: Language,
        code: String,
        tx: Reply<Result<Session, StoreError>>,
    },
    GetSession {
        session_id: SessionId,
        tx: Reply<Option<Session>>,
    },
    UpdateSession {
        session_id: SessionId,
        update: SessionUpdate,
        tx: Reply<Option<Session>>,
    },
    DeleteSession {
        session_id: SessionId,
        tx: Reply<bool>,
    },
    JoinSession {
        session_id: SessionId,
        name: Option<String>,
        tx: Reply<Result<User, StoreError>>,
    },
    LeaveSession {
        session_id: SessionId,
        user_id: UserId,
        tx: Reply<Result<(), StoreError>>,
    },
    ListUsers {
        session_id: SessionId,
        tx: Reply<Option<Vec<User>>>,
    },
}

pub type ServerTx = Sender<StoreCommand>;

struct Server {
    store: SessionStore,
}

impl Server {
    fn new(store: SessionStore) -> Self {
        Self { store }
    }

    fn handle_store_command(&mut self, command: StoreCommand) {
        let delivered = match command {
            StoreCommand::CreateSession { language, code, tx } => tx
                .send(
                    self.store
                        .create_session(language, code, now())
                        .map(Session::clone),
                )
                .is_ok(),
            StoreCommand::GetSession { session_id, tx } => tx
                .send(self.store.get_session(&session_id).cloned())
                .is_ok(),
            StoreCommand::UpdateSession {
                session_id,
                update,
                tx,
            } => tx
                .send(self.store.update_session(&session_id, update).cloned())
                .is_ok(),
            StoreCommand::DeleteSession { session_id, tx } => {
                tx.send(self.store.delete_session(&session_id)).is_ok()
            }
            StoreCommand::JoinSession {
                session_id,
                name,
                tx,
            } => tx
                .send(
                    self.store
                        .add_user(&session_id, name, now())
                        .map(User::clone),
                )
                .is_ok(),
            StoreCommand::LeaveSession {
                session_id,
                user_id,
                tx,
            } => tx
                .send(self.store.remove_user(&session_id, &user_id))
                .is_ok(),
            StoreCommand::ListUsers { session_id, tx } => tx
                .send(self.store.list_users(&session_id).map(<[User]>::to_vec))
                .is_ok(),
        };

        if !delivered {
            log::debug!("Requester went away before the store replied");
        }
    }
}

fn now() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

pub fn spawn_server() -> ServerTx {
    spawn_server_with_store(SessionStore::new())
}

pub fn spawn_server_with_store(store: SessionStore) -> ServerTx {
    let (srv_tx, mut srv_rx) = channel::<StoreCommand>(64);

    tokio::spawn(async move {
        let mut server = Server::new(store);
        log::info!("session store started");

        while let Some(command) = srv_rx.recv().await {
            server.handle_store_command(command);
        }

        log::info!("session store stopped");
    });

    srv_tx
}

/// Sends a command to the store task and waits for its reply.
pub async fn ask<T>(
    srv_tx: &ServerTx,
    command: impl FnOnce(Reply<T>) -> StoreCommand,
) -> Result<T, ApiError> {
    let (tx, rx) = oneshot::channel();
    srv_tx
        .send(command(tx))
        .await
        .map_err(|_| ApiError::Internal("Session store is unavailable".into()))?;
    rx.await
        .map_err(|_| ApiError::Internal("Session store dropped the request".into()))
}
