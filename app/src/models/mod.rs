pub mod desk;
pub mod employee;
