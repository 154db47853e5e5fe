use crate::api::RaceApi;
use crate::config::RaceTiming;
use crate::fsm::{RaceEvent, RacePhase, RaceWorkflow};
use crate::protocol::{RacePosition, RaceStatus};
use crate::render::{render_race_progress, render_race_start_view, render_results_view};
use crate::screen::{Region, Screen};
use crate::state::{ApplicationState, RaceSelection};
use anyhow::{anyhow, Result};
use rust_fsm::StateMachine;
use std::cell::RefCell;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timer used for the countdown and the poll cadence.
#[allow(async_fn_in_trait)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// Drives one race attempt: create, count down, start, poll until finished.
pub struct RaceOrchestrator<A, S, T> {
    api: A,
    screen: S,
    sleeper: T,
    timing: RaceTiming,
    workflow: RefCell<StateMachine<RaceWorkflow>>,
}

impl<A: RaceApi, S: Screen, T: Sleeper> RaceOrchestrator<A, S, T> {
    pub fn new(api: A, screen: S, sleeper: T, timing: RaceTiming) -> Self {
        Self {
            api,
            screen,
            sleeper,
            timing,
            workflow: RefCell::new(StateMachine::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn sleeper(&self) -> &T {
        &self.sleeper
    }

    pub fn phase(&self) -> RacePhase {
        *self.workflow.borrow().state()
    }

    fn advance(&self, event: RaceEvent) -> Result<()> {
        let mut workflow = self.workflow.borrow_mut();
        let from = *workflow.state();
        workflow
            .consume(&event)
            .map_err(|_| anyhow!("race workflow cannot apply {:?} while {:?}", event, from))?;
        debug!("race workflow {:?} -> {:?}", from, workflow.state());
        Ok(())
    }

    /// Drop whatever attempt was in flight and return to idle.
    pub fn abort(&self) {
        let _ = self.workflow.borrow_mut().consume(&RaceEvent::Abort);
    }

    /// Run a full race for `selection`. The race id lands in `state` as soon
    /// as the service assigns it.
    pub async fn run(
        &self,
        selection: RaceSelection,
        state: &RefCell<ApplicationState>,
    ) -> Result<Vec<RacePosition>> {
        if self.phase() == RacePhase::Finished {
            self.advance(RaceEvent::Reset)?;
        }
        // Entering Created claims the race slot before the first await.
        self.advance(RaceEvent::RaceCreated)?;
        state.borrow_mut().clear_race();

        let player_id = selection.racer.id;
        let track_id = selection.track.id;
        self.screen.render_at(
            Region::Race,
            &render_race_start_view(&selection.track, self.timing.countdown_ticks),
        );

        info!("Creating race for player {} on track {}", player_id, track_id);
        let created = self.api.create_race(player_id, track_id).await?;
        let race_id = created.race_id();
        state.borrow_mut().begin_race(race_id)?;
        info!("Race {} created (service id {})", race_id, created.id);

        self.advance(RaceEvent::CountdownBegan)?;
        self.run_countdown().await;

        self.api.start_race(race_id).await?;
        self.advance(RaceEvent::StartAcknowledged)?;
        info!("Race {} started", race_id);

        self.advance(RaceEvent::PollBegan)?;
        let positions = self.poll_until_finished(race_id, player_id).await?;
        self.advance(RaceEvent::FinishObserved)?;
        info!("Race {} finished", race_id);
        Ok(positions)
    }

    async fn run_countdown(&self) {
        self.sleeper.sleep(self.timing.countdown_lead_in).await;
        for remaining in (0..self.timing.countdown_ticks).rev() {
            self.sleeper.sleep(self.timing.countdown_tick).await;
            self.screen.render_at(Region::Countdown, &remaining.to_string());
        }
    }

    async fn poll_until_finished(&self, race_id: u32, player_id: u32) -> Result<Vec<RacePosition>> {
        loop {
            self.sleeper.sleep(self.timing.poll_interval).await;
            let snapshot = self.api.get_race(race_id).await?;
            match snapshot.status {
                RaceStatus::InProgress => {
                    self.screen.render_at(
                        Region::LeaderBoard,
                        &render_race_progress(&snapshot.positions, Some(player_id)),
                    );
                }
                RaceStatus::Finished => {
                    self.screen.render_at(
                        Region::Race,
                        &render_results_view(&snapshot.positions, Some(player_id)),
                    );
                    return Ok(snapshot.positions);
                }
                RaceStatus::NotStarted => debug!("Race {} not started yet", race_id),
                RaceStatus::Other(status) => {
                    warn!("Race {} reported unexpected status {:?}", race_id, status)
                }
            }
        }
    }
}
