use crate::core::{GameEvent, GameModel, GameModelDelegate, GameStatus, SquareGameboard, Tile, Vec2};

pub struct GameRenderState {
    pub board: SquareGameboard<Tile>,
    pub score: u32,
    pub threshold: u32,
    pub pending: usize,
    pub status: GameStatus,
    pub error: Option<String>,
    pub last_events: usize,
    /// Cells that merged or received a new tile on the last change.
    pub highlights: Vec<Vec2>,
}

impl GameRenderState {
    pub fn from_model<D: GameModelDelegate>(model: &GameModel<D>) -> Self {
        GameRenderState {
            board: model.board().clone(),
            score: model.score(),
            threshold: model.config().threshold,
            pending: model.pending_commands(),
            status: model.status(),
            error: None,
            last_events: 0,
            highlights: Vec::new(),
        }
    }
}

pub fn highlighted_cells(events: &[GameEvent]) -> Vec<Vec2> {
    let mut cells: Vec<Vec2> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::MoveTwo { to, .. } => Some(*to),
            GameEvent::Insert { at, .. } => Some(*at),
            GameEvent::MoveOne { .. } | GameEvent::ScoreChanged(_) => None,
        })
        .collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}
