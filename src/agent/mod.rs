//! The three generators. Each one is a single model call: build prompts,
//! call the completion client once, clean the reply.

pub mod architect;
pub mod forge;
pub mod mentor;

pub const ARCHITECT_TEMPERATURE: f32 = 0.3;
pub const CREATIVE_TEMPERATURE: f32 = 0.7;
