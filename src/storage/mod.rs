//! Storage of the dashboard
//!
//! Holds the current [`Dashboard`] in memory, will be destroyed on system shutdown. All changes
//! go through [`update`], one action at a time.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::aliases::AliasRecord;
use crate::state::Action;
use crate::state::Dashboard;
use crate::state::update;
use crate::view::PageSize;

/// In-memory storage of the dashboard
#[derive(Clone, Debug)]
pub struct Storage {
    /// The current dashboard, replaced on every action
    dashboard: Arc<Mutex<Dashboard>>,
}

impl Storage {
    /// Create a new storage with an empty dashboard
    pub fn new(page_size: PageSize) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new(page_size))),
        }
    }

    /// Look at the current dashboard
    pub async fn read<F, R>(&self, read: F) -> R
    where
        F: FnOnce(&Dashboard) -> R,
    {
        read(&*self.dashboard.lock().await)
    }

    /// Apply a single action
    pub async fn dispatch(&self, action: Action) {
        self.dispatch_all([action]).await;
    }

    /// Apply multiple actions, nothing else gets in between
    pub async fn dispatch_all<I>(&self, actions: I)
    where
        I: IntoIterator<Item = Action>,
    {
        let mut dashboard = self.dashboard.lock().await;

        for action in actions {
            apply(&mut dashboard, action);
        }
    }

    /// Apply an action and look at the result, nothing else gets in between
    pub async fn dispatch_and_read<F, R>(&self, action: Action, read: F) -> R
    where
        F: FnOnce(&Dashboard) -> R,
    {
        let mut dashboard = self.dashboard.lock().await;

        apply(&mut dashboard, action);

        read(&dashboard)
    }

    /// Decide on an action from the current dashboard, apply it and look at the result
    ///
    /// Nothing else gets in between, nothing is applied when the decision is an error
    pub async fn dispatch_with<D, F, R, E>(&self, decide: D, read: F) -> Result<R, E>
    where
        D: FnOnce(&Dashboard) -> Result<Action, E>,
        F: FnOnce(&Dashboard) -> R,
    {
        let mut dashboard = self.dashboard.lock().await;

        let action = decide(&dashboard)?;
        apply(&mut dashboard, action);

        Ok(read(&dashboard))
    }

    /// Find a single alias by its ID
    pub async fn find_single_alias_by_id(&self, id: i64) -> Option<AliasRecord> {
        self.read(|dashboard| dashboard.alias(id).cloned()).await
    }
}

/// Replace the dashboard with its next version
///
/// The current version stays in place until the next one is complete
fn apply(dashboard: &mut Dashboard, action: Action) {
    tracing::debug!("Applying action: {}", action.name());

    *dashboard = update(dashboard.clone(), action);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_aliases;
    use crate::state::Source;

    #[tokio::test]
    async fn test_dispatch() {
        let storage = Storage::new(PageSize::default());

        storage
            .dispatch(Action::AliasesLoaded(demo_aliases(), Source::Demo))
            .await;

        let total = storage.read(|dashboard| dashboard.aliases.len()).await;
        assert_eq!(8, total);

        let alias = storage.find_single_alias_by_id(2).await.unwrap();
        assert_eq!("john.news@canary.com", alias.email);
    }

    #[tokio::test]
    async fn test_dispatch_keeps_page_size() {
        let storage = Storage::new(PageSize::Unbounded);

        storage
            .dispatch_all([
                Action::AliasesLoaded(demo_aliases(), Source::Demo),
                Action::PageChanged(2),
            ])
            .await;

        let view = storage.read(|dashboard| dashboard.view.clone()).await;
        assert_eq!(PageSize::Unbounded, view.page_size);
        assert_eq!(2, view.page);
    }

    #[tokio::test]
    async fn test_dispatch_and_read() {
        let storage = Storage::new(PageSize::default());

        let clones = storage.clone();
        clones
            .dispatch(Action::AliasesLoaded(demo_aliases(), Source::Demo))
            .await;

        let remaining = storage
            .dispatch_and_read(Action::AliasDeleted(1), |dashboard| dashboard.aliases.len())
            .await;
        assert_eq!(7, remaining);
    }

    #[tokio::test]
    async fn test_dispatch_with() {
        let storage = Storage::new(PageSize::default());
        storage
            .dispatch(Action::AliasesLoaded(demo_aliases(), Source::Demo))
            .await;

        let rejected: Result<usize, &str> = storage
            .dispatch_with(
                |dashboard| match dashboard.alias(1) {
                    Some(_) => Err("taken"),
                    None => Ok(Action::AliasDeleted(2)),
                },
                |dashboard| dashboard.aliases.len(),
            )
            .await;
        assert_eq!(Err("taken"), rejected);

        let total = storage.read(|dashboard| dashboard.aliases.len()).await;
        assert_eq!(8, total);

        let remaining: Result<usize, &str> = storage
            .dispatch_with(
                |dashboard| match dashboard.alias(2) {
                    Some(alias) => Ok(Action::AliasDeleted(alias.id)),
                    None => Err("missing"),
                },
                |dashboard| dashboard.aliases.len(),
            )
            .await;
        assert_eq!(Ok(7), remaining);
    }
}
