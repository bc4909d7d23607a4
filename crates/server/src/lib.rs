pub mod errors;
pub mod params;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
