pub mod game;
pub mod shitsumon;
pub mod ticker;
