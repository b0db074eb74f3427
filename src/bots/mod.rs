pub mod human;
pub mod opponent;
pub mod random;
pub mod registry;

pub use human::HumanBot;
pub use opponent::{Move, OpponentBot, choose_move, preferred_shape};
pub use random::RandomBot;
pub use registry::{create_bot_from_spec, label_for_spec};
