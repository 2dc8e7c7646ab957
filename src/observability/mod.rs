pub mod health;
pub mod logging;
pub mod metrics;

pub use health::{DatabaseHealth, HealthChecker, HealthStatus};
pub use logging::{init_logging, mask_amount, try_init_logging, LogConfig, LogFormat};
pub use metrics::{get_metrics, init_metrics, LatencyTimer, Metrics, METRICS};
