//! Environment registry - order-preserving CRUD over one organization's environments.
//!
//! Every mutation follows the same path:
//! 1. take the registry's mutation lock
//! 2. load the current list from the settings store
//! 3. apply the change to an owned `EnvironmentList`
//! 4. write the **whole** list back
//! 5. fire the refresh signal
//!
//! Rejections (conflict, not found, last environment, bad input) happen in
//! step 3, before anything is written. A failed write is returned as is and
//! no refresh fires. Permissions are not checked here; callers gate.

use std::sync::Arc;

use tokio::sync::Mutex;

use flagdeck_domain::{
    Environment, EnvironmentId, EnvironmentList, EnvironmentMove, EnvironmentPatch,
    OrganizationId,
};

use super::{stored_list, EnvironmentError};
use crate::infrastructure::ports::{OrganizationSettingsRepo, RefreshPort};

/// Input for creating an environment. The id is validated on use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEnvironment {
    pub id: String,
    pub description: String,
    pub default_state: Option<bool>,
    pub toggle_on_list: bool,
}

impl NewEnvironment {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn into_environment(self) -> Result<Environment, EnvironmentError> {
        let id = EnvironmentId::new(self.id)?;
        let mut environment = Environment::new(id)
            .with_description(self.description)
            .with_toggle_on_list(self.toggle_on_list);
        if let Some(default_state) = self.default_state {
            environment = environment.with_default_state(default_state);
        }
        Ok(environment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// Which environment a reorder applies to.
#[derive(Debug, Clone, Copy)]
enum Target<'a> {
    Index(usize),
    Id(&'a EnvironmentId),
}

/// Environment CRUD for a single organization.
///
/// Mutations through one registry are serialized, and each re-reads the list
/// inside the lock, so concurrent clicks cannot overwrite each other. Writers
/// that bypass this registry can still race it; the store is last-writer-wins.
pub struct EnvironmentRegistry {
    organization: OrganizationId,
    settings: Arc<dyn OrganizationSettingsRepo>,
    refresh: Arc<dyn RefreshPort>,
    mutation_lock: Mutex<()>,
}

impl EnvironmentRegistry {
    pub fn new(
        organization: OrganizationId,
        settings: Arc<dyn OrganizationSettingsRepo>,
        refresh: Arc<dyn RefreshPort>,
    ) -> Self {
        Self {
            organization,
            settings,
            refresh,
            mutation_lock: Mutex::new(()),
        }
    }

    pub fn organization(&self) -> &OrganizationId {
        &self.organization
    }

    /// Current environments in order.
    pub async fn list(&self) -> Result<EnvironmentList, EnvironmentError> {
        let environments = self.settings.get_environments(&self.organization).await?;
        tracing::debug!(
            organization = %self.organization,
            count = environments.len(),
            "Loaded environments"
        );
        stored_list(environments)
    }

    /// Append a new environment.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the id is malformed
    /// - `Conflict` if the id is already in use (case-sensitive)
    pub async fn create(&self, input: NewEnvironment) -> Result<EnvironmentList, EnvironmentError> {
        let environment = input.into_environment()?;
        let id = environment.id().clone();

        let _guard = self.mutation_lock.lock().await;
        let mut list = self.list().await?;
        if let Err(e) = list.create(environment) {
            tracing::warn!(
                organization = %self.organization,
                environment = %id,
                "Rejected environment create: id already exists"
            );
            return Err(e.into());
        }

        self.commit(list, "create", &id).await
    }

    /// Change fields of an existing environment; its position is kept.
    ///
    /// An empty patch only checks existence and writes nothing.
    pub async fn update(
        &self,
        id: &EnvironmentId,
        patch: EnvironmentPatch,
    ) -> Result<EnvironmentList, EnvironmentError> {
        let _guard = self.mutation_lock.lock().await;
        let mut list = self.list().await?;
        let is_empty = patch.is_empty();
        list.update(id, patch)?;

        if is_empty {
            tracing::debug!(
                organization = %self.organization,
                environment = %id,
                "Empty environment patch, nothing to save"
            );
            return Ok(list);
        }

        self.commit(list, "update", id).await
    }

    /// Remove an environment.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no environment has this id
    /// - `Invariant` if it is the last one; nothing is written
    pub async fn delete(&self, id: &EnvironmentId) -> Result<EnvironmentList, EnvironmentError> {
        let _guard = self.mutation_lock.lock().await;
        let mut list = self.list().await?;
        if let Err(e) = list.remove(id) {
            tracing::warn!(
                organization = %self.organization,
                environment = %id,
                error = %e,
                "Rejected environment delete"
            );
            return Err(e.into());
        }

        self.commit(list, "delete", id).await
    }

    /// Move the environment at `index` one position towards the front.
    ///
    /// Index 0 is a no-op: nothing is written and the list is returned as is.
    pub async fn move_up(&self, index: usize) -> Result<EnvironmentList, EnvironmentError> {
        self.reorder(Target::Index(index), Direction::Up).await
    }

    /// Move the environment at `index` one position towards the back.
    ///
    /// The last index is a no-op: nothing is written and the list is returned as is.
    pub async fn move_down(&self, index: usize) -> Result<EnvironmentList, EnvironmentError> {
        self.reorder(Target::Index(index), Direction::Down).await
    }

    /// Move the environment named `id` one position up.
    ///
    /// Its position is looked up inside the mutation lock, so a reorder that
    /// lands in between cannot make this move a different environment.
    pub async fn move_up_by_id(
        &self,
        id: &EnvironmentId,
    ) -> Result<EnvironmentList, EnvironmentError> {
        self.reorder(Target::Id(id), Direction::Up).await
    }

    /// Move the environment named `id` one position down. See [`Self::move_up_by_id`].
    pub async fn move_down_by_id(
        &self,
        id: &EnvironmentId,
    ) -> Result<EnvironmentList, EnvironmentError> {
        self.reorder(Target::Id(id), Direction::Down).await
    }

    async fn reorder(
        &self,
        target: Target<'_>,
        direction: Direction,
    ) -> Result<EnvironmentList, EnvironmentError> {
        let _guard = self.mutation_lock.lock().await;
        let mut list = self.list().await?;
        let index = match target {
            Target::Index(index) => index,
            Target::Id(id) => list
                .position(id)
                .ok_or_else(|| EnvironmentError::NotFound(id.to_string()))?,
        };
        let outcome = match direction {
            Direction::Up => list.move_up(index),
            Direction::Down => list.move_down(index),
        };

        match outcome {
            EnvironmentMove::Moved { id, from, to } => {
                tracing::debug!(
                    organization = %self.organization,
                    environment = %id,
                    from,
                    to,
                    "Reordering environment"
                );
                self.commit(list, "reorder", &id).await
            }
            EnvironmentMove::AtBoundary { index } => {
                tracing::debug!(
                    organization = %self.organization,
                    index,
                    ?direction,
                    "Environment already at the edge, nothing to move"
                );
                Ok(list)
            }
            EnvironmentMove::OutOfRange { index, len } => Err(EnvironmentError::InvalidInput(
                format!("No environment at position {} (have {})", index, len),
            )),
        }
    }

    async fn commit(
        &self,
        list: EnvironmentList,
        operation: &'static str,
        id: &EnvironmentId,
    ) -> Result<EnvironmentList, EnvironmentError> {
        if let Err(e) = self
            .settings
            .replace_environments(&self.organization, list.as_slice())
            .await
        {
            tracing::warn!(
                organization = %self.organization,
                environment = %id,
                operation,
                error = %e,
                "Failed to save environments"
            );
            return Err(e.into());
        }

        tracing::info!(
            organization = %self.organization,
            environment = %id,
            operation,
            count = list.len(),
            "Saved environments"
        );
        self.refresh.refresh();
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockOrganizationSettingsRepo, MockRefreshPort, RepoError};

    fn org() -> OrganizationId {
        OrganizationId::new("org_test").expect("valid org id")
    }

    fn id(s: &str) -> EnvironmentId {
        EnvironmentId::new(s).expect("valid id")
    }

    fn envs(ids: &[&str]) -> Vec<Environment> {
        ids.iter().map(|s| Environment::new(id(s))).collect()
    }

    fn ids_of(environments: &[Environment]) -> Vec<String> {
        environments.iter().map(|e| e.id().to_string()).collect()
    }

    fn settings_with(current: &[&str]) -> MockOrganizationSettingsRepo {
        let mut settings = MockOrganizationSettingsRepo::new();
        let current = envs(current);
        settings
            .expect_get_environments()
            .returning(move |_| Ok(current.clone()));
        settings
    }

    fn expect_write(settings: &mut MockOrganizationSettingsRepo, expected: &[&str]) {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        settings
            .expect_replace_environments()
            .times(1)
            .withf(move |organization, environments| {
                organization.as_str() == "org_test" && ids_of(environments) == expected
            })
            .returning(|_, _| Ok(()));
    }

    fn refresh_once() -> MockRefreshPort {
        let mut refresh = MockRefreshPort::new();
        refresh.expect_refresh().times(1).return_const(());
        refresh
    }

    fn no_refresh() -> MockRefreshPort {
        let mut refresh = MockRefreshPort::new();
        refresh.expect_refresh().never();
        refresh
    }

    fn registry(
        settings: MockOrganizationSettingsRepo,
        refresh: MockRefreshPort,
    ) -> EnvironmentRegistry {
        EnvironmentRegistry::new(org(), Arc::new(settings), Arc::new(refresh))
    }

    #[tokio::test]
    async fn create_appends_and_refreshes() {
        let mut settings = settings_with(&["production", "staging"]);
        expect_write(&mut settings, &["production", "staging", "dev"]);

        let registry = registry(settings, refresh_once());
        let mut input = NewEnvironment::new("dev");
        input.description = "Developers".to_string();
        input.default_state = Some(false);

        let list = registry.create(input).await.expect("created");
        let dev = list.get(&id("dev")).expect("present");
        assert_eq!(dev.description, "Developers");
        assert!(!dev.default_state_enabled());
    }

    #[tokio::test]
    async fn create_duplicate_is_conflict_without_write() {
        let mut settings = settings_with(&["production", "staging"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry
            .create(NewEnvironment::new("staging"))
            .await
            .expect_err("conflict");
        assert!(matches!(err, EnvironmentError::Conflict(ref id) if id == "staging"));
    }

    #[tokio::test]
    async fn create_with_invalid_id_never_reads_or_writes() {
        let mut settings = MockOrganizationSettingsRepo::new();
        settings.expect_get_environments().never();
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry
            .create(NewEnvironment::new("$$$NEW$$$"))
            .await
            .expect_err("invalid id");
        assert!(matches!(err, EnvironmentError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let mut settings = settings_with(&["a", "b", "c"]);
        settings
            .expect_replace_environments()
            .times(1)
            .withf(|_, environments| {
                ids_of(environments) == ["a", "b", "c"]
                    && environments[1].toggle_on_list
                    && !environments[0].toggle_on_list
            })
            .returning(|_, _| Ok(()));

        let registry = registry(settings, refresh_once());
        let patch = EnvironmentPatch {
            toggle_on_list: Some(true),
            ..Default::default()
        };
        registry.update(&id("b"), patch).await.expect("updated");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let mut settings = settings_with(&["a"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let patch = EnvironmentPatch {
            description: Some("x".into()),
            ..Default::default()
        };
        let err = registry.update(&id("b"), patch).await.expect_err("missing");
        assert!(matches!(err, EnvironmentError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_patch_writes_nothing() {
        let mut settings = settings_with(&["a"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let list = registry
            .update(&id("a"), EnvironmentPatch::default())
            .await
            .expect("no-op");
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let mut settings = settings_with(&["production", "staging", "dev"]);
        expect_write(&mut settings, &["production", "dev"]);

        let registry = registry(settings, refresh_once());
        let list = registry.delete(&id("staging")).await.expect("deleted");
        assert_eq!(list.len(), 2);
    }

    #[tokio::test]
    async fn delete_last_environment_is_rejected_before_write() {
        let mut settings = settings_with(&["production"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry
            .delete(&id("production"))
            .await
            .expect_err("last environment");
        assert!(matches!(err, EnvironmentError::Invariant(_)));
    }

    #[tokio::test]
    async fn move_down_swaps_neighbours() {
        let mut settings = settings_with(&["production", "staging"]);
        expect_write(&mut settings, &["staging", "production"]);

        let registry = registry(settings, refresh_once());
        registry.move_down(0).await.expect("moved");
    }

    #[tokio::test]
    async fn move_up_swaps_neighbours() {
        let mut settings = settings_with(&["a", "b", "c"]);
        expect_write(&mut settings, &["b", "a", "c"]);

        let registry = registry(settings, refresh_once());
        registry.move_up(1).await.expect("moved");
    }

    #[tokio::test]
    async fn boundary_moves_write_nothing() {
        let mut settings = settings_with(&["a", "b"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let up = registry.move_up(0).await.expect("no-op");
        let down = registry.move_down(1).await.expect("no-op");
        assert_eq!(up.ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(down.ids().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[tokio::test]
    async fn out_of_range_move_is_invalid_input() {
        let mut settings = settings_with(&["a", "b"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry.move_down(5).await.expect_err("out of range");
        assert!(matches!(err, EnvironmentError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn write_failure_propagates_without_refresh() {
        let mut settings = settings_with(&["a", "b"]);
        settings
            .expect_replace_environments()
            .times(1)
            .returning(|_, _| Err(RepoError::remote("replace_environments", 500, "boom")));

        let registry = registry(settings, no_refresh());
        let err = registry.move_down(0).await.expect_err("write failed");
        assert!(matches!(
            err,
            EnvironmentError::Repo(RepoError::Remote { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn load_failure_propagates() {
        let mut settings = MockOrganizationSettingsRepo::new();
        settings
            .expect_get_environments()
            .returning(|_| Err(RepoError::transport("get_environments", "timed out")));
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry
            .create(NewEnvironment::new("dev"))
            .await
            .expect_err("load failed");
        assert!(matches!(err, EnvironmentError::Repo(RepoError::Transport { .. })));
    }

    #[tokio::test]
    async fn move_by_id_uses_the_stored_position() {
        // Someone else put "c" first; "a" is now at index 1, not 0.
        let mut settings = settings_with(&["c", "a", "b"]);
        expect_write(&mut settings, &["c", "b", "a"]);

        let registry = registry(settings, refresh_once());
        registry.move_down_by_id(&id("a")).await.expect("moved");
    }

    #[tokio::test]
    async fn move_up_by_id_at_front_writes_nothing() {
        let mut settings = settings_with(&["a", "b"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        registry.move_up_by_id(&id("a")).await.expect("no-op");
    }

    #[tokio::test]
    async fn move_by_missing_id_is_not_found() {
        let mut settings = settings_with(&["a", "b"]);
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry.move_up_by_id(&id("z")).await.expect_err("missing");
        assert!(matches!(err, EnvironmentError::NotFound(ref missing) if missing == "z"));
    }

    #[tokio::test]
    async fn duplicate_stored_ids_are_reported_as_invalid_store_state() {
        let mut settings = MockOrganizationSettingsRepo::new();
        settings.expect_get_environments().returning(|_| {
            Ok(vec![
                Environment::new(EnvironmentId::from_stored("production")),
                Environment::new(EnvironmentId::from_stored("production")),
            ])
        });
        settings.expect_replace_environments().never();

        let registry = registry(settings, no_refresh());
        let err = registry.move_down(0).await.expect_err("corrupt list");
        assert!(matches!(err, EnvironmentError::InvalidStoredList(_)));
    }
}
