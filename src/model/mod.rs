pub mod game;
pub mod quarter;
