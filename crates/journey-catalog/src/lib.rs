pub mod db;
pub mod destinations;
pub mod locations;
pub mod models;
pub mod samples;
pub mod store;
