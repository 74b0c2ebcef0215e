pub mod params;
pub mod player;
pub mod search;
pub mod table;
