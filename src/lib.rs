//! Grades Service - 成绩管理 gRPC 微服务
//!
//! 基于 Tonic 和 SeaORM 构建的单条成绩增删改查服务。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `proto`: 由 `proto/grades.proto` 生成的消息与服务定义
//! - `routes`: gRPC 服务组装
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 认证、截止时间与校验工具

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

pub mod proto {
    tonic::include_proto!("grades.v1");
}
