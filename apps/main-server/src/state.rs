//! Application state.

use std::sync::Arc;

use auth::JwtManager;
use dine_store::DineStore;
use visits::{CooldownMonitor, TrafficAnalyzer, VisitRecorder};

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: DineStore> {
    /// Server configuration.
    pub config: Config,
    /// Backing store.
    pub store: Arc<S>,
    /// JWT manager (present only when auth is enabled).
    pub jwt_manager: Option<JwtManager>,
    /// Visit recorder.
    pub recorder: VisitRecorder<S>,
    /// Cooldown monitor.
    pub cooldown: CooldownMonitor<S>,
    /// Traffic analyzer.
    pub traffic: TrafficAnalyzer<S>,
}

impl<S: DineStore + 'static> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, jwt_manager: Option<JwtManager>) -> Self {
        let store = Arc::new(store);
        Self {
            config,
            recorder: VisitRecorder::new(Arc::clone(&store)),
            cooldown: CooldownMonitor::new(Arc::clone(&store)),
            traffic: TrafficAnalyzer::new(Arc::clone(&store)),
            store,
            jwt_manager,
        }
    }

    /// Returns true if authentication is enforced.
    pub fn auth_enabled(&self) -> bool {
        self.config.auth_enabled()
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: DineStore + 'static>(
    config: Config,
    store: S,
    jwt_manager: Option<JwtManager>,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, jwt_manager))
}
