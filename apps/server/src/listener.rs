use cargroup::features::groups::events::{MembershipChanged, SeedingFinished};
use cargroup_event_bus::{Event, EventBus, EventBusError, EventReceiverExt};
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;
use tokio::task::JoinHandle;
use tracing::info;

/// Logs group notifications until the bus shuts down.
pub(crate) fn spawn(events: &EventBus) -> Result<Vec<JoinHandle<()>>, EventBusError> {
    Ok(vec![
        forward(events.subscribe::<MembershipChanged>()?, |change| {
            info!(
                region = %change.region,
                brand = %change.brand,
                previous = change.previous,
                current = change.current,
                "Group membership changed"
            );
        }),
        forward(events.subscribe::<SeedingFinished>()?, |SeedingFinished(report)| {
            info!(
                created = report.total_groups_created,
                skipped = report.skipped_existing,
                "{}",
                report.message()
            );
        }),
    ])
}

fn forward<T: Event>(mut rx: Receiver<Arc<T>>, log: fn(&T)) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv_event().await {
            log(&event);
        }
    })
}
