/// Service objects
///
/// Thin wrappers that forward CRUD calls to the [`Store`], always scoped to
/// the authenticated user. Route handlers call exactly one service method.
///
/// # Example
///
/// ```
/// use habitrack_shared::services::Services;
/// use habitrack_shared::store::memory::MemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), habitrack_shared::store::StoreError> {
/// let services = Services::new(Arc::new(MemoryStore::new()));
/// let settings = services.timer.get("user_123").await?;
/// assert_eq!(settings.work_duration, 25);
/// # Ok(())
/// # }
/// ```

pub mod habits;
pub mod timer;
pub mod todos;

use std::sync::Arc;

use crate::store::Store;

pub use habits::HabitsService;
pub use timer::TimerService;
pub use todos::TodosService;

/// All service objects over one shared store
#[derive(Clone)]
pub struct Services {
    pub habits: HabitsService,
    pub todos: TodosService,
    pub timer: TimerService,
    store: Arc<dyn Store>,
}

impl Services {
    /// Builds the services on top of a store
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            habits: HabitsService::new(store.clone()),
            todos: TodosService::new(store.clone()),
            timer: TimerService::new(store.clone()),
            store,
        }
    }

    /// The shared store, for diagnostics
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
