use crate::protocol::{Racer, Track};
use anyhow::{anyhow, bail, Result};

/// Everything one page session knows: cached lists, the user's picks and the
/// race currently being run.
#[derive(Clone, Debug, Default)]
pub struct ApplicationState {
    pub track_id: Option<u32>,
    pub player_id: Option<u32>,
    pub race_id: Option<u32>,
    pub tracks: Vec<Track>,
    pub racers: Vec<Racer>,
}

/// A validated pair of picks, resolved against the cached lists.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceSelection {
    pub track: Track,
    pub racer: Racer,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and leaves the selection alone) for ids that are not
    /// in the cached track list.
    pub fn select_track(&mut self, id: u32) -> bool {
        if !self.tracks.iter().any(|t| t.id == id) {
            return false;
        }
        self.track_id = Some(id);
        true
    }

    pub fn select_racer(&mut self, id: u32) -> bool {
        if !self.racers.iter().any(|r| r.id == id) {
            return false;
        }
        self.player_id = Some(id);
        true
    }

    pub fn race_selection(&self) -> Result<RaceSelection> {
        let (Some(track_id), Some(player_id)) = (self.track_id, self.player_id) else {
            bail!("Pick a track and a racer before starting a race");
        };
        let track = self
            .tracks
            .iter()
            .find(|t| t.id == track_id)
            .cloned()
            .ok_or_else(|| anyhow!("Track {track_id} is no longer available"))?;
        let racer = self
            .racers
            .iter()
            .find(|r| r.id == player_id)
            .cloned()
            .ok_or_else(|| anyhow!("Racer {player_id} is no longer available"))?;
        Ok(RaceSelection { track, racer })
    }

    /// Record the id of a freshly created race. The slot stays fixed until
    /// the next workflow calls `clear_race`.
    pub fn begin_race(&mut self, race_id: u32) -> Result<()> {
        if let Some(existing) = self.race_id {
            bail!("Race {existing} is still active");
        }
        self.race_id = Some(race_id);
        Ok(())
    }

    pub fn clear_race(&mut self) {
        self.race_id = None;
    }
}
