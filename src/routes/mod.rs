pub mod health;
pub mod proxy;
pub mod send;
pub mod static_files;
