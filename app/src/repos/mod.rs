pub mod desks;
pub mod employees;
