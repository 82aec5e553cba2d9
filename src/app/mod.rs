pub mod events;
pub mod fetch;
pub mod report;
pub mod settings;
pub mod state;
