mod combat;
mod economy;
mod game_state;
mod generation;
mod mastery;

pub use combat::CombatService;
pub use economy::{CraftResultMsg, EconomyService, TradeResultMsg, WalletMsg, WalletState};
pub use game_state::GameStateService;
pub use generation::GenerationService;
pub use mastery::MasteryService;
