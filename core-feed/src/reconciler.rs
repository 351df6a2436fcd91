//! Home feed state reconciler
//!
//! All state changes happen on one worker task. Public entry points only
//! enqueue a message, so they are cheap, non-blocking and never race each
//! other. The worker merges four inputs:
//!
//! - cache snapshots from [`VideoRepository::observe_all`]
//! - connectivity changes from the [`NetworkMonitor`]
//! - user commands (refresh, search, sort, select)
//! - completions of refreshes and debounced searches it started itself
//!
//! A successful refresh is never applied directly. Its rows reach the screen
//! through the cache subscription like any other write.

use crate::carousel::CarouselSampler;
use crate::state::{FeedUiState, LoadedFeed, NavigationEvent, GENERIC_FAILURE, NO_VIDEOS_FOUND};
use bridge_traits::network::{NetworkChangeStream, NetworkInfo, NetworkMonitor};
use core_async::sync::{mpsc, oneshot, CancellationToken};
use core_async::task::{self, JoinHandle};
use core_async::Debouncer;
use core_library::query::project;
use core_library::{Video, VideoListStream, VideoRepository};
use core_runtime::config::FeedSettings;
use core_runtime::events::{CoreEvent, EventBus, FeedEvent};
use core_runtime::observable::{OneShotChannel, OneShotReceiver, StateCell, StateReceiver};
use core_sync::{FeedSynchronizer, SyncOutcome};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const NAVIGATION_BUFFER: usize = 16;

/// Collaborators the reconciler is built from.
pub struct FeedDependencies {
    pub repository: Arc<dyn VideoRepository>,
    pub synchronizer: Arc<FeedSynchronizer>,
    pub network_monitor: Arc<dyn NetworkMonitor>,
    pub event_bus: EventBus,
    pub settings: FeedSettings,
}

enum Message {
    LoadVideos,
    SearchInputChanged(String),
    ToggleSort,
    VideoSelected(Video),
    ApplySearch { generation: u64 },
    RefreshFinished(core_sync::Result<SyncOutcome>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the home screen's state machine.
///
/// The worker stops on [`shutdown`](Self::shutdown) or when the handle is
/// dropped; a pending search and any in-flight refresh are abandoned.
pub struct FeedReconciler {
    mailbox: mpsc::UnboundedSender<Message>,
    state: StateCell<FeedUiState>,
    navigation: OneShotChannel<NavigationEvent>,
    shutdown: CancellationToken,
}

impl FeedReconciler {
    /// Start the worker. State begins at `Loading` and an initial refresh is
    /// attempted as soon as connectivity is known.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(deps: FeedDependencies) -> Self {
        let sampler = CarouselSampler::new(deps.settings.carousel_size);
        Self::spawn_with_sampler(deps, sampler)
    }

    pub fn spawn_with_sampler(deps: FeedDependencies, sampler: CarouselSampler) -> Self {
        let (mailbox, inbox) = mpsc::unbounded_channel();
        let state = StateCell::new(FeedUiState::Loading);
        let navigation = OneShotChannel::new(NAVIGATION_BUFFER);
        let shutdown = CancellationToken::new();

        let worker = Worker {
            state: state.clone(),
            navigation: navigation.clone(),
            mailbox: mailbox.clone(),
            synchronizer: deps.synchronizer,
            event_bus: deps.event_bus,
            debouncer: Debouncer::new(deps.settings.search_debounce),
            sampler,
            cache: Vec::new(),
            online: false,
            applied_query: String::new(),
            search_generation: 0,
            refresh: None,
        };

        task::spawn(worker.run(
            deps.repository,
            deps.network_monitor,
            inbox,
            shutdown.clone(),
        ));

        Self {
            mailbox,
            state,
            navigation,
            shutdown,
        }
    }

    /// Refresh from the remote feed. Ignored while offline.
    pub fn load_videos(&self) {
        self.send(Message::LoadVideos);
    }

    /// Update the search field. The list follows once input has been quiet
    /// for the debounce period. Ignored unless the feed is loaded.
    pub fn on_search_input_changed(&self, input: impl Into<String>) {
        self.send(Message::SearchInputChanged(input.into()));
    }

    /// Flip title sorting over the full cached list, clearing any search.
    /// Ignored unless the feed is loaded.
    pub fn on_toggle_sort(&self) {
        self.send(Message::ToggleSort);
    }

    /// Request navigation to `video`. Suppressed while offline.
    pub fn on_video_selected(&self, video: Video) {
        self.send(Message::VideoSelected(video));
    }

    pub fn state(&self) -> FeedUiState {
        self.state.get()
    }

    pub fn subscribe_state(&self) -> StateReceiver<FeedUiState> {
        self.state.subscribe()
    }

    /// Navigation requests emitted after this call. Nothing is replayed.
    pub fn navigation_events(&self) -> OneShotReceiver<NavigationEvent> {
        self.navigation.subscribe()
    }

    /// Wait until every command sent before this call has been handled.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.mailbox.send(Message::Flush(done)).is_ok() {
            wait.await.ok();
        }
    }

    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            debug!("Shutting down feed reconciler");
            self.shutdown.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown.is_cancelled() && !self.mailbox.is_closed()
    }

    fn send(&self, message: Message) {
        if self.mailbox.send(message).is_err() {
            debug!("Feed reconciler stopped; command dropped");
        }
    }
}

impl Drop for FeedReconciler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct Worker {
    state: StateCell<FeedUiState>,
    navigation: OneShotChannel<NavigationEvent>,
    mailbox: mpsc::UnboundedSender<Message>,
    synchronizer: Arc<FeedSynchronizer>,
    event_bus: EventBus,
    debouncer: Debouncer,
    sampler: CarouselSampler,
    /// Latest cache snapshot; search and sort project from this.
    cache: Vec<Video>,
    online: bool,
    /// Query the visible list was last filtered with.
    applied_query: String,
    search_generation: u64,
    refresh: Option<JoinHandle<()>>,
}

impl Worker {
    async fn run(
        mut self,
        repository: Arc<dyn VideoRepository>,
        network_monitor: Arc<dyn NetworkMonitor>,
        mut inbox: mpsc::UnboundedReceiver<Message>,
        shutdown: CancellationToken,
    ) {
        self.online = network_monitor.is_connected().await;

        let mut cache: VideoListStream = match repository.observe_all().await {
            Ok(stream) => stream,
            Err(e) => {
                error!(error = %e, "Cannot observe video cache");
                self.transition(FeedUiState::Error(failure_message(&e.to_string())));
                return;
            }
        };
        let mut cache_open = true;

        let mut network = match network_monitor.subscribe_changes().await {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!(error = %e, "Connectivity changes unavailable; using initial status");
                None
            }
        };

        info!(online = self.online, "Feed reconciler started");
        self.request_refresh();

        loop {
            core_async::select! {
                biased;
                _ = shutdown.cancelled() => break,
                snapshot = cache.next(), if cache_open => match snapshot {
                    Some(videos) => self.on_cache_changed(videos),
                    None => {
                        warn!("Video cache stream closed");
                        cache_open = false;
                    }
                },
                change = next_connectivity(&mut network) => match change {
                    Some(info) => self.on_connectivity_changed(info.is_online()),
                    None => {
                        debug!("Connectivity stream closed");
                        network = None;
                    }
                },
                Some(message) = inbox.recv() => self.handle(message),
            }
        }

        self.debouncer.cancel();
        if let Some(refresh) = self.refresh.take() {
            refresh.abort();
        }
        debug!("Feed reconciler stopped");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::LoadVideos => self.request_refresh(),
            Message::SearchInputChanged(input) => self.on_search_input_changed(input),
            Message::ToggleSort => self.on_toggle_sort(),
            Message::VideoSelected(video) => self.on_video_selected(video),
            Message::ApplySearch { generation } => self.apply_search(generation),
            Message::RefreshFinished(result) => self.on_refresh_finished(result),
            Message::Flush(done) => {
                done.send(()).ok();
            }
        }
    }

    fn on_cache_changed(&mut self, videos: Vec<Video>) {
        debug!(count = videos.len(), "Cache snapshot received");
        self.cache = videos;

        if !self.cache.is_empty() {
            let carousel_videos = self.sampler.sample(&self.cache);
            let (search_input, is_sorted) = match self.state.get() {
                FeedUiState::Loaded(feed) => (feed.search_input, feed.is_sorted),
                _ => {
                    self.reset_search();
                    (String::new(), false)
                }
            };
            let videos = project(&self.cache, &self.applied_query, is_sorted);
            self.transition(FeedUiState::Loaded(LoadedFeed {
                videos,
                carousel_videos,
                is_offline: !self.online,
                search_input,
                is_sorted,
            }));
        } else if !self.online {
            self.transition(FeedUiState::NoInternet);
        } else if !self.state.with(FeedUiState::is_loading) {
            self.transition(FeedUiState::Error(NO_VIDEOS_FOUND.to_string()));
        }
    }

    fn on_connectivity_changed(&mut self, online: bool) {
        if online == self.online {
            return;
        }
        self.online = online;
        info!(online, "Connectivity changed");
        self.emit(FeedEvent::ConnectivityChanged { online });

        match self.state.get() {
            FeedUiState::Loaded(_) => {
                self.state.update_if(|state| match state {
                    FeedUiState::Loaded(feed) if feed.is_offline == online => {
                        feed.is_offline = !online;
                        true
                    }
                    _ => false,
                });
            }
            FeedUiState::NoInternet => {
                if online {
                    self.request_refresh();
                }
            }
            FeedUiState::Loading | FeedUiState::Error(_) => {
                if !online {
                    self.transition(FeedUiState::NoInternet);
                }
            }
        }
    }

    fn request_refresh(&mut self) {
        if !self.online {
            debug!("Offline; refresh skipped");
            return;
        }

        if !self.state.with(FeedUiState::is_loaded) {
            self.transition(FeedUiState::Loading);
        }

        if self.refresh.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Refresh already in flight");
            return;
        }

        let synchronizer = Arc::clone(&self.synchronizer);
        let mailbox = self.mailbox.clone();
        self.refresh = Some(task::spawn(async move {
            let result = synchronizer.refresh().await;
            mailbox.send(Message::RefreshFinished(result)).ok();
        }));
    }

    fn on_refresh_finished(&mut self, result: core_sync::Result<SyncOutcome>) {
        self.refresh = None;

        match result {
            Ok(outcome) => {
                debug!(fetched = outcome.fetched, written = outcome.written, "Refresh finished");
                if outcome.written == 0
                    && self.cache.is_empty()
                    && self.state.with(FeedUiState::is_loading)
                {
                    self.transition(FeedUiState::Error(NO_VIDEOS_FOUND.to_string()));
                }
            }
            Err(e) => {
                if self.state.with(FeedUiState::is_loaded) {
                    warn!(error = %e, "Refresh failed; keeping cached videos");
                } else {
                    warn!(error = %e, "Refresh failed with nothing cached");
                    self.transition(FeedUiState::Error(failure_message(&e.to_string())));
                }
            }
        }
    }

    fn on_search_input_changed(&mut self, input: String) {
        if !self.state.with(FeedUiState::is_loaded) {
            warn!("Search input ignored; feed is not loaded");
            return;
        }

        self.state.update_if(|state| match state {
            FeedUiState::Loaded(feed) if feed.search_input != input => {
                feed.search_input = input;
                true
            }
            _ => false,
        });

        self.search_generation += 1;
        let generation = self.search_generation;
        let mailbox = self.mailbox.clone();
        debug!(generation, delay_ms = self.debouncer.delay().as_millis() as u64, "Search scheduled");
        self.debouncer.schedule(async move {
            mailbox.send(Message::ApplySearch { generation }).ok();
        });
    }

    fn apply_search(&mut self, generation: u64) {
        if generation != self.search_generation {
            debug!(generation, current = self.search_generation, "Stale search dropped");
            return;
        }

        let Some(query) = self.state.with(|state| state.as_loaded().map(|f| f.search_input.clone()))
        else {
            return;
        };
        self.applied_query = query;

        let cache = &self.cache;
        let query = &self.applied_query;
        self.state.update_if(|state| match state {
            FeedUiState::Loaded(feed) => {
                let videos = project(cache, query, feed.is_sorted);
                if feed.videos == videos {
                    false
                } else {
                    feed.videos = videos;
                    true
                }
            }
            _ => false,
        });
        debug!(query = %self.applied_query, "Search applied");
    }

    /// Sorting works on the full cached list and clears any search filter,
    /// including a search still waiting on the debounce.
    fn on_toggle_sort(&mut self) {
        if !self.state.with(FeedUiState::is_loaded) {
            warn!("Sort toggle ignored; feed is not loaded");
            return;
        }

        self.reset_search();
        let cache = &self.cache;
        self.state.update_if(|state| match state {
            FeedUiState::Loaded(feed) => {
                feed.is_sorted = !feed.is_sorted;
                feed.search_input.clear();
                feed.videos = project(cache, "", feed.is_sorted);
                true
            }
            _ => false,
        });
        debug!("Sort toggled");
    }

    fn on_video_selected(&mut self, video: Video) {
        let video_id = video.id.clone();
        if self.online {
            let delivered = self.navigation.emit(NavigationEvent::OpenVideo(video));
            debug!(%video_id, delivered, "Navigation requested");
            self.emit(FeedEvent::VideoSelected { video_id });
        } else {
            debug!(%video_id, "Offline; navigation suppressed");
            self.emit(FeedEvent::SelectionSuppressed { video_id });
        }
    }

    /// Forget search state when leaving `Loaded`; a fresh `Loaded` starts
    /// unfiltered.
    fn reset_search(&mut self) {
        self.debouncer.cancel();
        self.search_generation += 1;
        self.applied_query.clear();
    }

    fn transition(&mut self, next: FeedUiState) {
        let from = self.state.with(|state| state.name());
        let to = next.name();
        if self.state.set(next) && from != to {
            info!(from, to, "Feed state changed");
            self.emit(FeedEvent::StateChanged {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
    }

    fn emit(&self, event: FeedEvent) {
        self.event_bus.emit(CoreEvent::Feed(event)).ok();
    }
}

async fn next_connectivity(stream: &mut Option<Box<dyn NetworkChangeStream>>) -> Option<NetworkInfo> {
    match stream {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

fn failure_message(description: &str) -> String {
    if description.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        description.to_string()
    }
}
