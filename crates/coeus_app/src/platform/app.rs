use coeus_client::EngineHandle;
use coeus_core::{update, AppState, AppViewModel, Msg, Route, SessionSnapshot, SessionStore};
use coeus_logging::{coeus_debug, set_flow_step};

use super::effects::EffectRunner;

/// Owns the state machine and feeds it user actions and backend answers.
///
/// Every `dispatch` runs the pure update and executes the resulting effects;
/// `settle` then blocks until every backend call issued so far is answered.
pub struct FlowDriver {
    state: AppState,
    runner: EffectRunner,
}

impl FlowDriver {
    /// Builds a driver and resumes whatever the store remembers.
    pub fn new(engine: EngineHandle, store: Box<dyn SessionStore>) -> Self {
        let snapshot = store.load();
        let mut driver = Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine, store),
        };
        driver.dispatch(Msg::Restore(snapshot));
        driver
    }

    pub fn dispatch(&mut self, msg: Msg) {
        set_flow_step(msg.step());
        coeus_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    /// Dispatches `msg`, then waits for the backend answers it caused.
    pub fn dispatch_and_settle(&mut self, msg: Msg) {
        self.dispatch(msg);
        self.settle();
    }

    pub fn settle(&mut self) {
        while let Some(msg) = self.runner.next_msg() {
            self.dispatch(msg);
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn route(&self) -> Route {
        self.state.route()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn session(&self) -> SessionSnapshot {
        self.runner.store().load()
    }

    pub fn in_flight(&self) -> usize {
        self.runner.in_flight()
    }
}
