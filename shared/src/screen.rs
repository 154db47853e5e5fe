/// Named page regions that renders replace wholesale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Tracks,
    Racers,
    Race,
    LeaderBoard,
    Countdown,
    Notice,
}

impl Region {
    pub fn selector(&self) -> &'static str {
        match self {
            Region::Tracks => "#tracks",
            Region::Racers => "#racers",
            Region::Race => "#race",
            Region::LeaderBoard => "#leaderBoard",
            Region::Countdown => "#big-numbers",
            Region::Notice => "#notice",
        }
    }
}

/// Something that can show a markup fragment in a region.
pub trait Screen {
    fn render_at(&self, region: Region, html: &str);
}
