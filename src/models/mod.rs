//! 业务数据模型

pub mod grades;
