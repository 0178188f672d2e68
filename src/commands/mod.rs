pub mod sweep;

pub use sweep::execute_sweep;
