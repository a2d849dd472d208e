//! Generic list page controller
//!
//! Every list page follows the same lifecycle: load the entity list (plus an
//! optional lookup list) concurrently, hand the snapshot to a renderer, and
//! after any successful mutation reload the whole list. There is no
//! optimistic update; local state only ever changes by full replacement
//! after a successful load.

mod in_flight;
mod modal;
mod state;

pub use in_flight::{InFlight, InFlightGuard};
pub use modal::FormModal;
pub use state::{PageState, Phase, ViewKind};

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use validator::Validate;
use visitor_client::ClientResult;

use crate::error::{describe_error, validation_message};

/// A record with a stable identity
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

/// The remote operations behind one list page
#[async_trait]
pub trait ResourceApi: Send + Sync {
    type Entity: Entity;
    /// Editable fields, validated before any create/update call
    type Input: Validate + Default + Clone + Send + Sync + for<'a> From<&'a Self::Entity>;
    /// Secondary list fetched alongside the entities (e.g. sites)
    type Lookup: Default + Send;

    /// Singular noun used in messages ("customer")
    const SINGULAR: &'static str;
    /// Plural noun used in messages ("customers")
    const PLURAL: &'static str;

    async fn list(&self) -> ClientResult<Vec<Self::Entity>>;

    async fn lookup(&self) -> ClientResult<Self::Lookup> {
        Ok(Self::Lookup::default())
    }

    async fn create(&self, input: &Self::Input) -> ClientResult<Self::Entity>;

    async fn update(
        &self,
        id: <Self::Entity as Entity>::Id,
        input: &Self::Input,
    ) -> ClientResult<Self::Entity>;

    async fn delete(&self, id: <Self::Entity as Entity>::Id) -> ClientResult<()>;
}

type IdOf<R> = <<R as ResourceApi>::Entity as Entity>::Id;

/// What a list page should draw
#[derive(Debug)]
pub enum ListView<'a, E> {
    Loading,
    /// Full-page error with a retry action (call [`ListController::load`])
    FullPageError { message: &'a str },
    Table {
        rows: &'a [E],
        /// Dismissible error banner
        banner: Option<&'a str>,
        notice: Option<&'a str>,
        /// A refresh is running behind the current rows
        refreshing: bool,
    },
}

/// Owns one entity collection, its load state and its modal flags
pub struct ListController<R: ResourceApi> {
    api: R,
    items: Vec<R::Entity>,
    lookup: R::Lookup,
    state: PageState,
    modal: FormModal<R::Entity, R::Input>,
    details: Option<IdOf<R>>,
    in_flight: InFlight<IdOf<R>>,
}

impl<R: ResourceApi> ListController<R> {
    pub fn new(api: R) -> Self {
        Self {
            api,
            items: Vec::new(),
            lookup: R::Lookup::default(),
            state: PageState::default(),
            modal: FormModal::default(),
            details: None,
            in_flight: InFlight::default(),
        }
    }

    pub fn api(&self) -> &R {
        &self.api
    }

    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn find(&self, id: IdOf<R>) -> Option<&R::Entity> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn lookup(&self) -> &R::Lookup {
        &self.lookup
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn notice(&self) -> Option<&str> {
        self.state.notice()
    }

    pub fn modal(&self) -> &FormModal<R::Entity, R::Input> {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut FormModal<R::Entity, R::Input> {
        &mut self.modal
    }

    /// Id whose detail modal is open
    pub fn details(&self) -> Option<IdOf<R>> {
        self.details
    }

    /// Handle to the in-flight set, shareable with a renderer
    pub fn in_flight(&self) -> &InFlight<IdOf<R>> {
        &self.in_flight
    }

    pub fn is_busy(&self, id: IdOf<R>) -> bool {
        self.in_flight.contains(&id)
    }

    /// Fetch the entity list and lookup list concurrently and replace local
    /// state with the result. On failure the previous rows stay in place.
    pub async fn load(&mut self) {
        self.state.begin_load();
        tracing::debug!(resource = R::PLURAL, "Loading");

        match tokio::try_join!(self.api.list(), self.api.lookup()) {
            Ok((items, lookup)) => {
                tracing::debug!(resource = R::PLURAL, count = items.len(), "Loaded");
                self.items = items;
                self.lookup = lookup;
                self.state.finish_load();
            }
            Err(e) => {
                tracing::warn!(resource = R::PLURAL, error = %e, "Load failed");
                let fallback = format!("Failed to load {}", R::PLURAL);
                self.state.fail_load(describe_error(&e, &fallback));
            }
        }
    }

    pub fn view(&self) -> ListView<'_, R::Entity> {
        match self.state.view_kind(!self.items.is_empty()) {
            ViewKind::Loading => ListView::Loading,
            ViewKind::FullPageError => ListView::FullPageError {
                message: self.state.error().unwrap_or_default(),
            },
            ViewKind::Content => ListView::Table {
                rows: &self.items,
                banner: self.state.error(),
                notice: self.state.notice(),
                refreshing: self.state.is_loading(),
            },
        }
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    pub fn open_edit(&mut self, entity: R::Entity) {
        self.modal.open_edit(entity);
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Submit the modal's current fields
    pub async fn submit_modal(&mut self) -> bool {
        let input = self.modal.fields().clone();
        self.submit(input).await
    }

    /// Create, or update the entity being edited. On success the modal is
    /// closed and reset and the list reloaded; on failure nothing changes
    /// except the banner.
    pub async fn submit(&mut self, input: R::Input) -> bool {
        self.state.dismiss_notice();
        if let Err(errors) = input.validate() {
            self.state.fail_action(validation_message(&errors));
            return false;
        }

        let result = match self.modal.editing_id() {
            Some(id) => self.api.update(id, &input).await.map(|_| ()),
            None => self.api.create(&input).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                self.modal.close();
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(resource = R::SINGULAR, error = %e, "Save failed");
                let fallback = format!("Failed to save {}", R::SINGULAR);
                self.state.fail_action(describe_error(&e, &fallback));
                false
            }
        }
    }

    /// Delete `entity` and reload on success
    pub async fn remove(&mut self, entity: &R::Entity) -> bool {
        let id = entity.id();
        self.state.dismiss_notice();
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(resource = R::SINGULAR, %id, "Deleted");
                if self.details == Some(id) {
                    self.details = None;
                }
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(resource = R::SINGULAR, %id, error = %e, "Delete failed");
                let fallback = format!("Failed to delete {}", R::SINGULAR);
                self.state.fail_action(describe_error(&e, &fallback));
                false
            }
        }
    }

    /// Open the detail modal; the modal fetches its own data
    pub fn view_details(&mut self, entity: &R::Entity) {
        self.details = Some(entity.id());
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    pub fn dismiss_error(&mut self) {
        self.state.dismiss_error();
    }

    /// Put a failure from outside the list lifecycle on the banner
    pub fn report_error(&mut self, message: String) {
        self.state.fail_action(message);
    }

    pub fn set_notice(&mut self, message: String) {
        self.state.set_notice(message);
    }

    pub fn dismiss_notice(&mut self) {
        self.state.dismiss_notice();
    }

    /// Claim `id` for a row action. `None` when the row is already busy.
    pub fn begin_row(&self, id: IdOf<R>) -> Option<InFlightGuard<IdOf<R>>> {
        let guard = self.in_flight.begin(id);
        if guard.is_none() {
            tracing::debug!(resource = R::SINGULAR, %id, "Row action already running");
        }
        guard
    }

    /// Run the network half of a row action.
    ///
    /// Only borrows the controller, so actions on different rows can run
    /// at the same time. Returns `None` without calling `action` when the
    /// row is busy. The row leaves the in-flight set before this returns.
    pub async fn row_call<T, Fut>(&self, id: IdOf<R>, action: Fut) -> Option<ClientResult<T>>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let _guard = self.begin_row(id)?;
        Some(action.await)
    }

    /// Apply a finished row action: failures go to the banner.
    pub fn finish_row<T>(
        &mut self,
        id: IdOf<R>,
        fallback: &str,
        result: ClientResult<T>,
    ) -> Option<T> {
        self.state.dismiss_notice();
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(resource = R::SINGULAR, %id, error = %e, "Row action failed");
                self.state.fail_action(describe_error(&e, fallback));
                None
            }
        }
    }

    /// [`row_call`](Self::row_call) followed by [`finish_row`](Self::finish_row)
    pub async fn run_row_action<T, Fut>(
        &mut self,
        id: IdOf<R>,
        fallback: &str,
        action: Fut,
    ) -> Option<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let result = self.row_call(id, action).await?;
        self.finish_row(id, fallback, result)
    }
}
