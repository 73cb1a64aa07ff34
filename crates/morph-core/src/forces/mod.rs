pub mod orbit;
pub mod pointer;
pub mod spring;
