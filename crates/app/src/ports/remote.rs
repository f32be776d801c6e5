//! Remote source port: the authoritative device store as seen by the
//! dashboard.

use std::future::Future;

use homedeck_domain::activity::NewActivity;
use homedeck_domain::device::{Device, DeviceStatus};
use homedeck_domain::error::HomeDeckError;
use homedeck_domain::id::DeviceId;

/// Read/write access to the remote device set.
///
/// Every failure (unreachable host, non-success response, undecodable body)
/// is reported as an error; the synchronizer decides how to recover.
pub trait DeviceSource: Send + Sync {
    /// Fetch the full device set.
    fn fetch_devices(&self) -> impl Future<Output = Result<Vec<Device>, HomeDeckError>> + Send;

    /// Replace the status of one device.
    ///
    /// Success means the remote accepted the write. Whatever it echoes back
    /// is ignored: the stored state is learnt from the next fetch.
    fn write_status(
        &self,
        id: &DeviceId,
        status: &DeviceStatus,
    ) -> impl Future<Output = Result<(), HomeDeckError>> + Send;

    /// Append an entry to the remote activity log.
    fn record_activity(
        &self,
        activity: NewActivity,
    ) -> impl Future<Output = Result<(), HomeDeckError>> + Send;
}
