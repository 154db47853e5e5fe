#![allow(dead_code)]

use anyhow::{anyhow, Result};
use shared::api::RaceApi;
use shared::orchestrator::Sleeper;
use shared::protocol::{CreatedRace, RacePosition, RaceSnapshot, RaceStatus, Racer, Track};
use shared::screen::{Region, Screen};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    FetchTracks,
    FetchRacers,
    CreateRace { player_id: u32, track_id: u32 },
    StartRace(u32),
    Accelerate(u32),
    GetRace(u32),
}

/// In-memory race service with scripted race snapshots.
#[derive(Default)]
pub struct FakeApi {
    pub tracks: Vec<Track>,
    pub racers: Vec<Racer>,
    pub created_id: u32,
    pub fail_tracks: bool,
    pub fail_start: bool,
    pub snapshots: RefCell<VecDeque<RaceSnapshot>>,
    /// Returned once `snapshots` runs dry.
    pub steady_snapshot: Option<RaceSnapshot>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn with_roster() -> Self {
        Self {
            tracks: (1..=3)
                .map(|id| Track { id, name: format!("Track {id}") })
                .collect(),
            racers: (4..=6)
                .map(|id| Racer {
                    id,
                    driver_name: format!("Racer {id}"),
                    top_speed: 500.0,
                    acceleration: 10.0,
                    handling: 10.0,
                })
                .collect(),
            created_id: 10,
            ..Self::default()
        }
    }

    pub fn script(self, snapshots: Vec<RaceSnapshot>) -> Self {
        *self.snapshots.borrow_mut() = snapshots.into();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| matches(c)).count()
    }
}

impl RaceApi for FakeApi {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        self.calls.borrow_mut().push(Call::FetchTracks);
        if self.fail_tracks {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.tracks.clone())
    }

    async fn fetch_racers(&self) -> Result<Vec<Racer>> {
        self.calls.borrow_mut().push(Call::FetchRacers);
        Ok(self.racers.clone())
    }

    async fn create_race(&self, player_id: u32, track_id: u32) -> Result<CreatedRace> {
        self.calls.borrow_mut().push(Call::CreateRace { player_id, track_id });
        Ok(CreatedRace { id: self.created_id })
    }

    async fn start_race(&self, race_id: u32) -> Result<()> {
        self.calls.borrow_mut().push(Call::StartRace(race_id));
        if self.fail_start {
            return Err(anyhow!("race {race_id} could not be started"));
        }
        Ok(())
    }

    async fn accelerate(&self, race_id: u32) -> Result<()> {
        self.calls.borrow_mut().push(Call::Accelerate(race_id));
        Ok(())
    }

    async fn get_race(&self, race_id: u32) -> Result<RaceSnapshot> {
        self.calls.borrow_mut().push(Call::GetRace(race_id));
        let next = self.snapshots.borrow_mut().pop_front();
        next.or_else(|| self.steady_snapshot.clone())
            .ok_or_else(|| anyhow!("no more snapshots for race {race_id}"))
    }
}

#[derive(Default)]
pub struct RecordingScreen {
    pub renders: RefCell<Vec<(Region, String)>>,
}

impl RecordingScreen {
    pub fn in_region(&self, region: Region) -> Vec<String> {
        self.renders
            .borrow()
            .iter()
            .filter(|(r, _)| *r == region)
            .map(|(_, html)| html.clone())
            .collect()
    }

    pub fn last(&self, region: Region) -> Option<String> {
        self.in_region(region).pop()
    }
}

impl Screen for RecordingScreen {
    fn render_at(&self, region: Region, html: &str) {
        self.renders.borrow_mut().push((region, html.to_string()));
    }
}

/// Tokio sleep that also remembers every requested duration.
#[derive(Default)]
pub struct RecordingSleeper {
    pub requested: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.requested.borrow_mut().push(duration);
        tokio::time::sleep(duration).await;
    }
}

pub fn position(id: u32, segment: u32, final_position: Option<u32>) -> RacePosition {
    RacePosition {
        id,
        driver_name: format!("Racer {id}"),
        segment,
        final_position,
    }
}

pub fn snapshot(status: RaceStatus, positions: Vec<RacePosition>) -> RaceSnapshot {
    RaceSnapshot { status, positions }
}
