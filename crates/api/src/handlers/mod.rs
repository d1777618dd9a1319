pub mod content;
pub mod servers;
