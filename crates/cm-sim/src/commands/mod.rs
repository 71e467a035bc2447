pub mod power_law;
pub mod run;
pub mod validate;
