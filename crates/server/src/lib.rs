pub mod errors;
pub mod requests;
pub mod response;
pub mod routes;
pub mod startup;

pub use startup::run;
