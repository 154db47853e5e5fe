use rust_fsm::*;

/// Phases of one race attempt, from submit to results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Created,
    CountingDown,
    Started,
    Polling,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceEvent {
    RaceCreated,
    CountdownBegan,
    StartAcknowledged,
    PollBegan,
    FinishObserved,
    Reset,
    Abort,
}

pub struct RaceWorkflow;

impl StateMachineImpl for RaceWorkflow {
    type Input = RaceEvent;
    type State = RacePhase;
    type Output = ();
    const INITIAL_STATE: Self::State = RacePhase::Idle;

    fn transition(state: &Self::State, input: &Self::Input) -> Option<Self::State> {
        match (state, input) {
            (RacePhase::Idle, RaceEvent::RaceCreated) => Some(RacePhase::Created),
            (RacePhase::Created, RaceEvent::CountdownBegan) => Some(RacePhase::CountingDown),
            (RacePhase::CountingDown, RaceEvent::StartAcknowledged) => Some(RacePhase::Started),
            (RacePhase::Started, RaceEvent::PollBegan) => Some(RacePhase::Polling),
            (RacePhase::Polling, RaceEvent::FinishObserved) => Some(RacePhase::Finished),
            (RacePhase::Finished, RaceEvent::Reset) => Some(RacePhase::Idle),
            (_, RaceEvent::Abort) => Some(RacePhase::Idle),
            _ => None,
        }
    }

    fn output(_state: &Self::State, _input: &Self::Input) -> Option<Self::Output> {
        None
    }
}

impl RacePhase {
    /// A workflow owns the race slot from creation until it finishes.
    pub fn is_busy(&self) -> bool {
        !matches!(self, RacePhase::Idle | RacePhase::Finished)
    }
}

impl Default for RacePhase {
    fn default() -> Self {
        RacePhase::Idle
    }
}
