use super::{ChatSessionController, PendingReply};
use crate::error::ChatResult;
use tracing::{debug, info};

/// Remembers which seed value was last forwarded into the chat.
///
/// Armed while `last_dispatched` is `None` or differs from the current seed;
/// fired once the current seed has been forwarded. Clearing the seed re-arms
/// it, so the same text can go out again after the host empties it. Values
/// are compared exactly as the host supplied them; only the blank check looks
/// past surrounding whitespace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedDispatchState {
    last_dispatched: Option<String>,
}

impl SeedDispatchState {
    pub fn is_armed_for(&self, seed: Option<&str>) -> bool {
        match non_blank(seed) {
            Some(value) => self.last_dispatched.as_deref() != Some(value),
            None => true,
        }
    }

    pub fn last_dispatched(&self) -> Option<&str> {
        self.last_dispatched.as_deref()
    }

    /// Feeds the current seed through the machine and returns the value to
    /// forward, if this evaluation is an armed→fired edge.
    pub fn observe(&mut self, seed: Option<&str>) -> Option<String> {
        let Some(value) = non_blank(seed) else {
            if self.last_dispatched.take().is_some() {
                debug!("seed cleared, dispatcher re-armed");
            }
            return None;
        };

        if self.last_dispatched.as_deref() == Some(value) {
            return None;
        }
        self.last_dispatched = Some(value.to_string());
        Some(value.to_string())
    }
}

fn non_blank(seed: Option<&str>) -> Option<&str> {
    seed.filter(|value| !value.trim().is_empty())
}

/// Forwards a host-supplied seed message into a chat session at most once per
/// distinct non-empty value.
pub struct InitialMessageDispatcher {
    state: SeedDispatchState,
    controller: ChatSessionController,
}

impl InitialMessageDispatcher {
    pub fn new(controller: ChatSessionController) -> Self {
        Self {
            state: SeedDispatchState::default(),
            controller,
        }
    }

    pub fn state(&self) -> &SeedDispatchState {
        &self.state
    }

    /// Call on every re-evaluation of the host props.
    ///
    /// On an armed→fired edge the seed is already in the history when this
    /// returns; the caller drives the reply with
    /// [`ChatSessionController::complete`] without blocking on it.
    pub fn sync(&mut self, seed: Option<&str>) -> Option<ChatResult<PendingReply>> {
        let value = self.state.observe(seed)?;
        info!("dispatching initial message");
        Some(self.controller.begin(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_for_repeated_seed() {
        let mut state = SeedDispatchState::default();
        let fired = (0..100).filter_map(|_| state.observe(Some("hello"))).count();
        assert_eq!(fired, 1);
        assert_eq!(state.last_dispatched(), Some("hello"));
    }

    #[test]
    fn test_rearms_after_clear() {
        let mut state = SeedDispatchState::default();
        assert_eq!(state.observe(Some("hello")).as_deref(), Some("hello"));
        assert!(!state.is_armed_for(Some("hello")));
        assert_eq!(state.observe(Some("")), None);
        assert!(state.is_armed_for(Some("hello")));
        assert_eq!(state.observe(Some("hello")).as_deref(), Some("hello"));
    }

    #[test]
    fn test_never_fires_for_empty_seed() {
        let mut state = SeedDispatchState::default();
        for seed in [None, Some(""), Some("   "), None] {
            assert_eq!(state.observe(seed), None);
        }
        assert_eq!(state.last_dispatched(), None);
    }

    #[test]
    fn test_padded_seed_is_a_distinct_value() {
        let mut state = SeedDispatchState::default();
        assert_eq!(state.observe(Some("hello")).as_deref(), Some("hello"));
        assert_eq!(state.observe(Some("hello ")).as_deref(), Some("hello "));
        assert_eq!(state.observe(Some("hello ")), None);
        assert_eq!(state.last_dispatched(), Some("hello "));
    }

    #[test]
    fn test_distinct_value_fires_without_clear() {
        let mut state = SeedDispatchState::default();
        assert!(state.observe(Some("first")).is_some());
        assert_eq!(state.observe(Some("second")).as_deref(), Some("second"));
        assert_eq!(state.observe(Some("second")), None);
    }
}
