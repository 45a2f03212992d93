use crate::core::models::Vec2;

/// Receives every score and board change the game model makes.
pub trait GameModelDelegate {
    fn score_changed(&mut self, score: u32);
    fn move_one_tile(&mut self, from: Vec2, to: Vec2, value: u32);
    fn move_two_tiles(&mut self, from: (Vec2, Vec2), to: Vec2, value: u32);
    fn insert_tile(&mut self, at: Vec2, value: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEvent {
    ScoreChanged(u32),
    MoveOne { from: Vec2, to: Vec2, value: u32 },
    MoveTwo { from: (Vec2, Vec2), to: Vec2, value: u32 },
    Insert { at: Vec2, value: u32 },
}

/// Delegate that records events until they are drained.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl GameModelDelegate for EventLog {
    fn score_changed(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn move_one_tile(&mut self, from: Vec2, to: Vec2, value: u32) {
        self.events.push(GameEvent::MoveOne { from, to, value });
    }

    fn move_two_tiles(&mut self, from: (Vec2, Vec2), to: Vec2, value: u32) {
        self.events.push(GameEvent::MoveTwo { from, to, value });
    }

    fn insert_tile(&mut self, at: Vec2, value: u32) {
        self.events.push(GameEvent::Insert { at, value });
    }
}
