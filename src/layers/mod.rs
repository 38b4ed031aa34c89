pub mod base;
pub mod cluster;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod tile;
pub mod vector;
