//! 预导入模块，方便使用

pub use super::grades::Entity as Grades;
