pub mod app;
pub mod export;
pub mod generators;
pub mod maze;
pub mod session;
pub mod solvers;
