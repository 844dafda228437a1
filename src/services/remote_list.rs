use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::{
    api::{ApiClient, ApiResponse, AuthMode, HttpMethod, RequestBody},
    errors::{AppError, AppResult},
    services::notifications::Notifications,
};

/// An item a screen lists. Items the server has not assigned an id yet return `None`.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Display + PartialEq + Clone + Send + Sync + 'static;

    fn id(&self) -> Option<Self::Id>;
}

/// What a successful write does to the local list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterWrite {
    Refetch,
    PatchLocally,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub singular: &'static str,
    pub plural: &'static str,
    pub collection: String,
    pub create_path: Option<String>,
    pub auth: AuthMode,
    pub after_write: AfterWrite,
}

impl Endpoint {
    pub fn new(
        singular: &'static str,
        plural: &'static str,
        collection: impl Into<String>,
        auth: AuthMode,
    ) -> Self {
        Self {
            singular,
            plural,
            collection: collection.into(),
            create_path: None,
            auth,
            after_write: AfterWrite::Refetch,
        }
    }

    pub fn create_at(mut self, path: impl Into<String>) -> Self {
        self.create_path = Some(path.into());
        self
    }

    pub fn patch_locally(mut self) -> Self {
        self.after_write = AfterWrite::PatchLocally;
        self
    }

    pub fn create_path(&self) -> &str {
        self.create_path.as_deref().unwrap_or(&self.collection)
    }

    pub fn item_path(&self, id: &impl Display) -> String {
        format!("{}/{}", self.collection.trim_end_matches('/'), id)
    }

    fn title(&self) -> String {
        let mut chars = self.singular.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
struct ListState<R> {
    items: Vec<R>,
    load_state: LoadState,
    generation: u64,
}

/// List state for one screen, fed from one REST collection.
///
/// Reads replace the list or record an inline error while keeping prior items.
/// Writes notify on success or failure and then refetch or patch locally. No lock
/// is held across a request, and responses that land after `unmount` are dropped.
#[derive(Clone)]
pub struct RemoteList<R: Resource> {
    client: ApiClient,
    endpoint: Endpoint,
    notifications: Notifications,
    state: Arc<RwLock<ListState<R>>>,
    mounted: Arc<AtomicBool>,
}

impl<R: Resource> RemoteList<R> {
    pub fn new(client: ApiClient, endpoint: Endpoint, notifications: Notifications) -> Self {
        Self {
            client,
            endpoint,
            notifications,
            state: Arc::new(RwLock::new(ListState {
                items: Vec::new(),
                load_state: LoadState::Idle,
                generation: 0,
            })),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.mounted.store(true, Ordering::SeqCst);
        self.refresh().await
    }

    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub async fn items(&self) -> Vec<R> {
        self.state.read().await.items.clone()
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load_state.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.load_state().await == LoadState::Loading
    }

    pub async fn find(&self, id: &R::Id) -> Option<R> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|item| item.id().as_ref() == Some(id))
            .cloned()
    }

    pub async fn refresh(&self) -> AppResult<()> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.load_state = LoadState::Loading;
            state.generation
        };

        let result = self
            .client
            .get_json::<Vec<R>>(&self.endpoint.collection, self.endpoint.auth)
            .await;

        if !self.is_mounted() {
            log::debug!("Dropping {} response for unmounted screen", self.endpoint.plural);
            return result.map(|_| ());
        }

        let mut state = self.state.write().await;
        if state.generation != generation {
            log::debug!("Dropping stale {} response", self.endpoint.plural);
            return result.map(|_| ());
        }

        match result {
            Ok(items) => {
                log::debug!("Loaded {} {}", items.len(), self.endpoint.plural);
                state.items = items;
                state.load_state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                log::warn!("Failed to fetch {}: {}", self.endpoint.plural, err);
                state.load_state =
                    LoadState::Failed(format!("Could not load {}.", self.endpoint.plural));
                Err(err)
            }
        }
    }

    pub async fn create(&self, body: RequestBody) -> AppResult<()> {
        let response = self
            .client
            .send(HttpMethod::Post, self.endpoint.create_path(), self.endpoint.auth, body)
            .await
            .map_err(|e| self.write_failed("create", e))?;

        self.notifications
            .success(format!("{} created!", self.endpoint.title()));

        match self.endpoint.after_write {
            AfterWrite::PatchLocally => match response.json::<R>() {
                Ok(item) => self.patch(move |items| items.push(item)).await,
                Err(_) => self.refetch_after_write().await,
            },
            AfterWrite::Refetch => self.refetch_after_write().await,
        }
        Ok(())
    }

    /// `replacement` is what the item becomes when the endpoint patches locally.
    pub async fn update(
        &self,
        id: &R::Id,
        body: RequestBody,
        replacement: Option<R>,
    ) -> AppResult<()> {
        let path = self.endpoint.item_path(id);
        self.client
            .send(HttpMethod::Put, &path, self.endpoint.auth, body)
            .await
            .map_err(|e| self.write_failed("update", e))?;

        self.notifications
            .success(format!("{} updated!", self.endpoint.title()));

        match (self.endpoint.after_write, replacement) {
            (AfterWrite::PatchLocally, Some(replacement)) => {
                let id = id.clone();
                self.patch(move |items| {
                    for item in items.iter_mut() {
                        if item.id().as_ref() == Some(&id) {
                            *item = replacement.clone();
                        }
                    }
                })
                .await
            }
            _ => self.refetch_after_write().await,
        }
        Ok(())
    }

    /// Update when an item is being edited, create otherwise.
    pub async fn save(
        &self,
        editing: Option<&R::Id>,
        body: RequestBody,
        replacement: Option<R>,
    ) -> AppResult<()> {
        match editing {
            Some(id) => self.update(id, body, replacement).await,
            None => self.create(body).await,
        }
    }

    pub async fn delete(&self, id: &R::Id) -> AppResult<()> {
        let path = self.endpoint.item_path(id);
        self.client
            .delete(&path, self.endpoint.auth)
            .await
            .map_err(|e| self.write_failed("delete", e))?;

        self.notifications
            .success(format!("{} deleted!", self.endpoint.title()));

        match self.endpoint.after_write {
            AfterWrite::PatchLocally => {
                let id = id.clone();
                self.patch(move |items| items.retain(|item| item.id().as_ref() != Some(&id)))
                    .await
            }
            AfterWrite::Refetch => self.refetch_after_write().await,
        }
        Ok(())
    }

    /// A write outside the collection verbs, such as a role change or a like.
    /// Failure notifies with `failure_message`; nothing is refetched here.
    pub async fn action(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        failure_message: &str,
    ) -> AppResult<ApiResponse> {
        self.client
            .send(method, path, self.endpoint.auth, body)
            .await
            .map_err(|e| {
                log::warn!("{} {} failed: {}", method, path, e);
                self.notifications.error(failure_message);
                e
            })
    }

    /// Applies a local edit unless the screen is gone.
    pub async fn patch(&self, edit: impl FnOnce(&mut Vec<R>)) {
        if !self.is_mounted() {
            return;
        }
        let mut state = self.state.write().await;
        edit(&mut state.items);
    }

    async fn refetch_after_write(&self) {
        if let Err(e) = self.refresh().await {
            log::warn!("Refetch of {} after write failed: {}", self.endpoint.plural, e);
        }
    }

    fn write_failed(&self, verb: &str, err: AppError) -> AppError {
        log::warn!("Failed to {} {}: {}", verb, self.endpoint.singular, err);
        self.notifications
            .error(format!("Failed to {} {}", verb, self.endpoint.singular));
        err
    }
}
