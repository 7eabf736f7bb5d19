use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared log of handler names in the order they were invoked
#[derive(Clone, Default)]
pub struct InvocationLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl InvocationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callable that records `name` and returns `result`
    pub fn recorder(
        &self,
        name: &str,
        result: i32,
    ) -> impl Fn(&Value) -> i32 + Send + Sync + 'static {
        let entries = Arc::clone(&self.entries);
        let name = name.to_string();
        move |_| {
            entries.lock().push(name.clone());
            result
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }
}

/// Callable that counts its invocations
pub fn counter() -> (Arc<AtomicUsize>, impl Fn(&Value) -> i32 + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let callable = move |_: &Value| {
        handle.fetch_add(1, Ordering::SeqCst);
        0
    };
    (count, callable)
}

pub fn count_of(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
