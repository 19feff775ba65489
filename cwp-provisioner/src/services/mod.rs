//! 业务逻辑服务层

mod account_provisioner;

pub use account_provisioner::{AccountProvisioner, TerminationOutcome, SESSION_TIMER_MINUTES};
