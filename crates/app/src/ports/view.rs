//! View port: where the dashboard is drawn.

use crate::sync::DashboardSnapshot;

/// Renders dashboard snapshots.
///
/// Called synchronously after every refresh and every marker change, so
/// implementations must not block for long.
pub trait DeviceView: Send + Sync {
    fn render(&self, snapshot: &DashboardSnapshot);
}
