use crate::config::{ConfigError, ControlConfig};
use crate::control_system::emergency::EmergencyTimer;
use crate::control_system::state::{reduce, Action, Applied, ControlState, Outcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::time::Duration;

struct Shared {
    state: ControlState,
    rng: SmallRng,
}

/// Owns the control state, its random source and the emergency auto-revert timer.
///
/// All mutations go through [`ControlCenter::dispatch`], which runs the reducer
/// under a single lock.
pub struct ControlCenter {
    shared: Arc<Mutex<Shared>>,
    emergency_timer: Mutex<Option<EmergencyTimer>>,
    emergency_duration: Duration,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// The reducer works on a copy so a panic mid-action leaves the stored state intact.
fn apply(shared: &Mutex<Shared>, action: &Action) -> Outcome {
    let mut guard = lock(shared);
    let Shared { state, rng } = &mut *guard;
    let (next, outcome) = reduce(state.clone(), action, rng);
    *state = next;
    outcome
}

impl ControlCenter {
    pub fn new(config: &ControlConfig) -> Result<Self, ConfigError> {
        Self::with_state(ControlState::seeded(config), config)
    }

    /// Wraps an existing state. Both the config and the state's own cycle
    /// timing must be valid. A state already in emergency mode gets a fresh
    /// lapse timer.
    pub fn with_state(state: ControlState, config: &ControlConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        state.cycle_timing.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let in_emergency = state.emergency_mode;
        let center = Self {
            shared: Arc::new(Mutex::new(Shared { state, rng })),
            emergency_timer: Mutex::new(None),
            emergency_duration: config.emergency_duration(),
        };
        if in_emergency {
            center.schedule_emergency_lapse();
        }
        Ok(center)
    }

    /// Applies an action. Starting an emergency also schedules its automatic
    /// end, which needs a running tokio runtime.
    pub fn dispatch(&self, action: Action) -> Outcome {
        let outcome = apply(&self.shared, &action);
        if let Ok(Applied::EmergencyStarted { .. }) = outcome {
            self.schedule_emergency_lapse();
        }
        outcome
    }

    fn schedule_emergency_lapse(&self) {
        if Handle::try_current().is_err() {
            log::error!("[ControlCenter] no tokio runtime; emergency mode will not end automatically");
            return;
        }
        let shared = Arc::clone(&self.shared);
        let timer = EmergencyTimer::schedule(self.emergency_duration, move || {
            if let Err(rejection) = apply(&shared, &Action::EmergencyLapsed) {
                log::warn!("[ControlCenter] emergency lapse ignored: {}", rejection);
            }
        });
        log::info!(
            "[ControlCenter] emergency mode active for {}s",
            self.emergency_duration.as_secs()
        );
        *lock(&self.emergency_timer) = Some(timer);
    }

    /// A copy of the current state for rendering.
    pub fn snapshot(&self) -> ControlState {
        lock(&self.shared).state.clone()
    }

    /// Runs a read-only projection without cloning the state.
    pub fn with_state_ref<T>(&self, f: impl FnOnce(&ControlState) -> T) -> T {
        f(&lock(&self.shared).state)
    }

    /// Lends the center's random source, so seeded runs stay reproducible.
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut SmallRng) -> T) -> T {
        f(&mut lock(&self.shared).rng)
    }

    pub fn is_emergency_active(&self) -> bool {
        lock(&self.shared).state.emergency_mode
    }

    /// Cancels a pending emergency timer. Emergency mode, if active, stays on.
    pub fn shutdown(&self) {
        if let Some(mut timer) = lock(&self.emergency_timer).take() {
            timer.cancel();
        }
    }
}

impl Drop for ControlCenter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
