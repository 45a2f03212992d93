mod board;
mod consts;
mod delegate;
mod game_model;
mod models;
mod update;

pub use board::SquareGameboard;
pub use consts::*;
pub use delegate::{EventLog, GameEvent, GameModelDelegate};
pub use game_model::{GameModel, MoveCompletion};
pub use models::{Direction, GameStatus, MoveOrder, Tile, UserAction, Vec2};
pub use update::{collapse_line, perform_move, LineOrder, LineOutcome, MoveOutcome};
