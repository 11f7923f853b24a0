pub mod app;
pub mod coordinator;
pub mod core;
pub mod heap;
pub mod ordering;
pub mod pixel;
