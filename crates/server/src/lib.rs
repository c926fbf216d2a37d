pub mod errors;
pub mod routes;
pub mod startup;
pub mod web_assets;

pub use startup::run;
