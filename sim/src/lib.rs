// Library exports for the guidance server simulator

pub mod controller;
pub mod server;

pub use controller::SimulatedController;
pub use server::SimServer;
