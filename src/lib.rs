//! Simulation core for the road_racer arcade game.
//!
//! Everything in the library is independent of the terminal: pure data
//! (`entities`), pure logic with injected randomness (`compute`), the
//! high-score file store (`score_store`) and the optional tunables file
//! (`config`). The binary adds rendering, audio and the input loop on top.

pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod score_store;
