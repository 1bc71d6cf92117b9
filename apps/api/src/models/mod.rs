pub mod dates;
pub mod resume;
