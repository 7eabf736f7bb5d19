use parking_lot::{Mutex, MutexGuard};
use pugback::constants::env;

/// Serializes every test in a binary that reads or writes `PUGBACK_*` variables
static ENV_LOCK: Mutex<()> = parking_lot::const_mutex(());

const ENGINE_VARS: [&str; 4] = [
    env::EVENT_CHANNEL_CAPACITY,
    env::MAX_GROUPS,
    env::MAX_HANDLERS_PER_GROUP,
    env::LOG_HANDLER_OUTCOMES,
];

/// Exclusive access to the engine's environment variables
///
/// Starts with every engine variable unset and removes whatever was set again
/// on drop, before the lock is released.
pub struct ScopedEnv {
    _lock: MutexGuard<'static, ()>,
}

impl ScopedEnv {
    pub fn new() -> Self {
        let lock = ENV_LOCK.lock();
        clear_engine_vars();
        Self { _lock: lock }
    }

    pub fn set(self, name: &str, value: &str) -> Self {
        std::env::set_var(name, value);
        self
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        clear_engine_vars();
    }
}

fn clear_engine_vars() {
    for name in ENGINE_VARS {
        std::env::remove_var(name);
    }
}
