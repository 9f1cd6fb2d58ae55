//! Clinic Edge Server - 牙科诊所管理系统服务端
//!
//! # 架构概述
//!
//! 本模块是诊所服务端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储（models + repository）
//! - **编号生成** (`sequence`): 病历号/就诊号/队列号/付款号的原子序列
//! - **金额计算** (`billing`): rust_decimal 精确金额运算
//! - **业务服务** (`services`): 就诊、治疗、付款的多步写入编排
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! clinic-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── db/            # 数据库层
//! ├── sequence/      # 序列号生成
//! ├── billing/       # 金额计算
//! ├── services/      # 业务编排
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod billing;
pub mod core;
pub mod db;
pub mod sequence;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use sequence::SequenceService;
pub use services::{PaymentService, TreatmentService, VisitService};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ________    _       _
  / ____/ /   (_)___  (_)____
 / /   / /   / / __ \/ / ___/
/ /___/ /___/ / / / / / /__
\____/_____/_/_/ /_/_/\___/
    ______    __
   / ____/___/ /___ ____
  / __/ / __  / __ `/ _ \
 / /___/ /_/ / /_/ /  __/
/_____/\__,_/\__, /\___/
            /____/
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None, None);

    Ok(())
}
