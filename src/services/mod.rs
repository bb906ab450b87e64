pub mod grades;

pub use grades::GradeService;
