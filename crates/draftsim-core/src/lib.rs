// Library root for the draft simulator core: catalogue, draft engine, config.

pub mod catalogue;
pub mod config;
pub mod draft;
