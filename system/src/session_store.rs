use crate::color::pick_color;
use crate::display_name::resolve_display_name;
use crate::error::StoreError;
use crate::id::{generate_session_id, generate_user_id};
use crate::types::{
    Language, Session, SessionId, SessionUpdate, Timestamp, User, MAX_USERS_PER_SESSION,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

const MAX_ID_ATTEMPTS: usize = 16;

/// In-memory sessions keyed by id. Not synchronized; callers own it
/// exclusively (see the server's store task).
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
    rng: StdRng,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            sessions: HashMap::new(),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn create_session(
        &mut self,
        language: Language,
        code: String,
        now: Timestamp,
    ) -> Result<&Session, StoreError> {
        let session_id = self.new_session_id()?;
        log::info!("Session {} created ({})", session_id, language);
        let session = Session::new(session_id.clone(), language, code, now);
        Ok(self.sessions.entry(session_id).or_insert(session))
    }

    pub fn get_session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn update_session(&mut self, session_id: &str, update: SessionUpdate) -> Option<&Session> {
        let session = self.sessions.get_mut(session_id)?;
        session.apply(update);
        Some(&*session)
    }

    pub fn delete_session(&mut self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            log::info!("Session {} deleted", session_id);
        }
        removed
    }

    pub fn add_user(
        &mut self,
        session_id: &str,
        name: Option<String>,
        now: Timestamp,
    ) -> Result<&User, StoreError> {
        let Self { sessions, rng } = self;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;

        if session.is_full() {
            log::warn!("Session {} rejected a join: at capacity", session_id);
            return Err(StoreError::SessionAtCapacity(MAX_USERS_PER_SESSION));
        }

        let user_id = (0..MAX_ID_ATTEMPTS)
            .map(|_| generate_user_id(rng))
            .find(|candidate| !session.has_user(candidate))
            .ok_or(StoreError::IdSpaceExhausted)?;
        let color = pick_color(rng, &session.colors_in_use()).to_string();
        let name = resolve_display_name(rng, name);

        log::info!("User {} ({}) joined session {}", user_id, name, session_id);
        let index = session.users.len();
        session.users.push(User {
            id: user_id,
            name,
            color,
            joined_at: now,
        });
        Ok(&session.users[index])
    }

    pub fn remove_user(&mut self, session_id: &str, user_id: &str) -> Result<(), StoreError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        let before = session.users.len();
        session.users.retain(|u| u.id != user_id);
        if session.users.len() == before {
            return Err(StoreError::UserNotFound(user_id.to_string()));
        }
        log::info!("User {} left session {}", user_id, session_id);
        Ok(())
    }

    pub fn list_users(&self, session_id: &str) -> Option<&[User]> {
        self.sessions.get(session_id).map(|s| s.users.as_slice())
    }

    fn new_session_id(&mut self) -> Result<SessionId, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = generate_session_id(&mut self.rng);
            if !self.sessions.contains_key(&candidate) {
                return Ok(candidate);
            }
            log::debug!("Session id collision on {}, regenerating", candidate);
        }
        Err(StoreError::IdSpaceExhausted)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
