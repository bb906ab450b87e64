//! 配置管理
//!
//! 分层加载：默认值 → config 文件 → 环境变量。
//! 仅启动流程读取全局配置，核心组件通过构造参数接收各自的配置段。

mod r#impl;
mod structs;

pub use structs::*;
