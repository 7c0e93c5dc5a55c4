pub mod factory;
pub mod file;
pub mod kings_gist;
