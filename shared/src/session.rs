use crate::api::RaceApi;
use crate::config::RaceTiming;
use crate::events::UiEvent;
use crate::fsm::RacePhase;
use crate::orchestrator::{RaceOrchestrator, Sleeper};
use crate::render::{render_error_view, render_notice, render_racer_list, render_track_list};
use crate::screen::{Region, Screen};
use crate::state::ApplicationState;
use futures::future::{abortable, AbortHandle};
use std::cell::{Ref, RefCell};
use tracing::{debug, error, info, warn};

/// One page session: owns the application state and routes user events to
/// state changes, renders and race workflows.
pub struct RaceSession<A, S, T> {
    state: RefCell<ApplicationState>,
    orchestrator: RaceOrchestrator<A, S, T>,
    workflow_abort: RefCell<Option<AbortHandle>>,
}

impl<A: RaceApi, S: Screen, T: Sleeper> RaceSession<A, S, T> {
    pub fn new(api: A, screen: S, sleeper: T, timing: RaceTiming) -> Self {
        Self {
            state: RefCell::new(ApplicationState::new()),
            orchestrator: RaceOrchestrator::new(api, screen, sleeper, timing),
            workflow_abort: RefCell::new(None),
        }
    }

    pub fn state(&self) -> Ref<'_, ApplicationState> {
        self.state.borrow()
    }

    pub fn phase(&self) -> RacePhase {
        self.orchestrator.phase()
    }

    pub fn api(&self) -> &A {
        self.orchestrator.api()
    }

    pub fn screen(&self) -> &S {
        self.orchestrator.screen()
    }

    pub fn sleeper(&self) -> &T {
        self.orchestrator.sleeper()
    }

    /// Fetch and draw the track and racer lists. A failed fetch leaves the
    /// loading placeholder in place.
    pub async fn load(&self) {
        let tracks = self.api().fetch_tracks().await.unwrap_or_default();
        info!("Loaded {} tracks", tracks.len());
        self.state.borrow_mut().tracks = tracks;
        self.render_tracks();

        let racers = self.api().fetch_racers().await.unwrap_or_default();
        info!("Loaded {} racers", racers.len());
        self.state.borrow_mut().racers = racers;
        self.render_racers();
    }

    fn render_tracks(&self) {
        let html = {
            let state = self.state.borrow();
            render_track_list(&state.tracks, state.track_id)
        };
        self.screen().render_at(Region::Tracks, &html);
    }

    fn render_racers(&self) {
        let html = {
            let state = self.state.borrow();
            render_racer_list(&state.racers, state.player_id)
        };
        self.screen().render_at(Region::Racers, &html);
    }

    pub async fn handle(&self, event: UiEvent) {
        debug!("Handling {:?}", event);
        match event {
            UiEvent::SelectTrack(id) => {
                let selected = self.state.borrow_mut().select_track(id);
                if selected {
                    self.render_tracks();
                } else {
                    warn!("Ignoring selection of unknown track {}", id);
                }
            }
            UiEvent::SelectRacer(id) => {
                let selected = self.state.borrow_mut().select_racer(id);
                if selected {
                    self.render_racers();
                } else {
                    warn!("Ignoring selection of unknown racer {}", id);
                }
            }
            UiEvent::SubmitRace => self.submit().await,
            UiEvent::Accelerate => self.accelerate().await,
        }
    }

    async fn submit(&self) {
        if self.phase().is_busy() {
            warn!("Race already in progress ({:?}), ignoring submit", self.phase());
            return;
        }

        let selection = self.state.borrow().race_selection();
        let selection = match selection {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Cannot create race: {}", e);
                self.screen().render_at(Region::Notice, &render_notice(&e.to_string()));
                return;
            }
        };
        self.screen().render_at(Region::Notice, "");

        let (workflow, handle) = abortable(self.orchestrator.run(selection, &self.state));
        *self.workflow_abort.borrow_mut() = Some(handle);
        let outcome = workflow.await;
        self.workflow_abort.borrow_mut().take();

        match outcome {
            Ok(Ok(positions)) => info!("Race complete with {} racers", positions.len()),
            Ok(Err(e)) => {
                error!("an error occurred: {:#}", e);
                self.orchestrator.abort();
                self.state.borrow_mut().clear_race();
                self.screen()
                    .render_at(Region::Race, &render_error_view(&format!("{e:#}")));
            }
            Err(_) => {
                info!("Race workflow cancelled");
                self.orchestrator.abort();
                self.state.borrow_mut().clear_race();
            }
        }
    }

    async fn accelerate(&self) {
        let race_id = self.state.borrow().race_id;
        let Some(race_id) = race_id else {
            debug!("No active race to accelerate");
            return;
        };
        if self.api().accelerate(race_id).await.is_err() {
            debug!("Dropped accelerate for race {}", race_id);
        }
    }

    /// Stop an in-flight workflow at its next suspension point.
    pub fn cancel(&self) {
        if let Some(handle) = self.workflow_abort.borrow().as_ref() {
            info!("Cancelling race workflow");
            handle.abort();
        }
    }
}
