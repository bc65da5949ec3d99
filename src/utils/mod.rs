pub mod grades;
pub mod page;
pub mod portal;
pub mod render;
pub mod session;
