pub mod assignment;
pub mod desk_id;
pub mod diagram;
pub mod directory;
pub mod error;
pub mod floors;
