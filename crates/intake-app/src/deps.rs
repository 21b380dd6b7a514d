//! # Session Dependencies / 会话依赖
//!
//! Parameter grouping for [`crate::WizardSession`] construction.
//! 用于构造 [`crate::WizardSession`] 的参数打包。
//!
//! **Not a Builder / 不是 Builder**: no defaults, no hidden logic.

use std::sync::Arc;

use intake_core::ports::{AuthApiPort, ClockPort, IntakeApiPort, LocalStoragePort};

/// Wizard session dependency grouping
/// 向导会话依赖分组
pub struct SessionDeps {
    // Storage dependencies / 存储依赖
    pub local_storage: Arc<dyn LocalStoragePort>,

    // Backend dependencies / 后端依赖
    pub auth_api: Arc<dyn AuthApiPort>,
    pub intake_api: Arc<dyn IntakeApiPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
}
