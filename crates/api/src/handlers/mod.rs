pub mod conversion;
pub mod gauge;
pub mod hook;
pub mod needle;
pub mod project;
pub mod usage;
pub mod yarn;
