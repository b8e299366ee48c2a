pub mod architecture;
pub mod audit;
pub mod dashboard;
