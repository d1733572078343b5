//! List command filters

use clap::Args;

use crate::client::models::AlertQuery;

/// Alert list filters for narrowing down results
#[derive(Debug, Clone, Args, Default)]
pub struct AlertFilterArgs {
    /// Relative time window amount
    #[arg(long, default_value_t = 2)]
    pub time_amount: u32,

    /// Relative time window unit (hour, day, week, month)
    #[arg(long, default_value = "week")]
    pub time_unit: String,

    /// Filter by policy severity
    #[arg(long)]
    pub severity: Option<String>,

    /// Filter by policy type (config, network, audit_event, ...)
    #[arg(long)]
    pub policy_type: Option<String>,
}

impl AlertFilterArgs {
    pub fn to_query(&self) -> AlertQuery {
        AlertQuery {
            time_amount: self.time_amount,
            time_unit: self.time_unit.clone(),
            severity: self.severity.clone(),
            policy_type: self.policy_type.clone(),
        }
    }
}
