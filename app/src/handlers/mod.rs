pub mod desks;
pub mod employees;
pub mod floors;
