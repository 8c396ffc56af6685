use std::{path::PathBuf, sync::Arc};

use crate::{db::OrmConn, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub sessions: SessionStore,
    pub public_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(orm: OrmConn, public_dir: PathBuf) -> Self {
        Self {
            orm,
            sessions: SessionStore::default(),
            public_dir: Arc::new(public_dir),
        }
    }

    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}
