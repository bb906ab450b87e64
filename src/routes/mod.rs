pub mod grades;

pub use grades::configure_grades_routes;
