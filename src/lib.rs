//! Assignment Tracker - 课程作业跟踪系统核心
//!
//! 用户、课程、作业与提交分别存放在互相独立的分区中，分区之间只通过
//! ID 关联。每次修改都会同步写回对应分区，登录时再按 ID 列表重建
//! 内存中的双向关系。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `notify`: 邮件通知接口
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层与登录重建
//! - `storage`: 分区存储、ID 分配与持久化策略
//! - `utils`: 工具函数

pub mod config;
pub mod errors;
pub mod models;
pub mod notify;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
