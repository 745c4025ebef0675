pub mod aggregation;
pub mod clustering;
pub mod diversify;
pub mod filtering;
pub mod profile;
pub mod providers;
pub mod recommendations;
pub mod scoring;
