pub mod human;
pub mod tick_gate;

pub use human::HumanMode;
pub use tick_gate::TickGate;
