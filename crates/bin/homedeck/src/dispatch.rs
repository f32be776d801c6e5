//! Route parsed commands onto the synchronizer.

use std::error::Error;

use homedeck_adapter_dashboard_terminal::{DashboardCommand, HELP};
use homedeck_app::ports::{DeviceSource, DeviceView};
use homedeck_app::sync::{CommandOutcome, Synchronizer};

/// Run one command and return the feedback to print, if any.
///
/// [`DashboardCommand::Quit`] is handled by the caller and ignored here.
pub async fn dispatch<S, V>(sync: &Synchronizer<S, V>, command: DashboardCommand) -> Option<String>
where
    S: DeviceSource,
    V: DeviceView,
{
    let (id, result) = match command {
        DashboardCommand::Light { id, power } => {
            let result = sync.toggle_light(&id, power).await;
            (id, result)
        }
        DashboardCommand::Brightness { id, value } => {
            let result = sync.update_brightness(&id, &value).await;
            (id, result)
        }
        DashboardCommand::Lock { id, locked } => {
            let result = sync.toggle_lock(&id, locked).await;
            (id, result)
        }
        DashboardCommand::Temperature { id, target } => {
            let result = sync.adjust_temperature(&id, target).await;
            (id, result)
        }
        DashboardCommand::Camera { id, recording } => {
            let result = sync.toggle_camera(&id, recording).await;
            (id, result)
        }
        DashboardCommand::Refresh => {
            sync.refresh().await;
            return None;
        }
        DashboardCommand::Help => return Some(HELP.to_string()),
        DashboardCommand::Quit => return None,
    };

    match result {
        Ok(CommandOutcome::Confirmed) => None,
        Ok(CommandOutcome::Ignored) => Some(format!("no matching device {id}")),
        Ok(CommandOutcome::Failed) => Some(format!("device {id} did not accept the change")),
        Err(err) => Some(describe(&err)),
    }
}

/// The error followed by its sources, `outer: inner`.
fn describe(err: &dyn Error) -> String {
    std::iter::successors(Some(err), |&err| err.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
