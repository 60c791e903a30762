pub mod direction;
pub mod position;

pub use direction::Direction;
pub use position::Position;
