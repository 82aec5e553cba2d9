pub mod forecast;
pub mod geocode;
pub mod reverse;
