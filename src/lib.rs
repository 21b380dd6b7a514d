//! Audit Intake
//!
//! 审计需求收集向导：终端视图层与启动装配。

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod views;

// 重新导出常用类型
pub use cli::Cli;
pub use commands::{Command, CommandError, Reply};
pub use views::{StepView, ViewError};
