use log::trace;

use crate::{
    core::{DataStream, TransitionError},
    dx::transition::{event_engine::TransitionEvent, TransitionSnapshot},
};

pub(super) fn execute(
    snapshot: TransitionSnapshot,
    stream: &DataStream<TransitionSnapshot>,
) -> Result<Vec<TransitionEvent>, TransitionError> {
    trace!("Emit snapshot: {}", snapshot.status);
    stream.push_data(snapshot);

    Ok(vec![])
}

#[cfg(test)]
mod it_should {
    use super::*;
    use crate::dx::transition::TransitionStatus;
    use futures::StreamExt;

    #[tokio::test]
    async fn push_snapshot_into_stream() {
        let stream = DataStream::new();
        let snapshot = TransitionSnapshot {
            status: TransitionStatus::Entering,
            visible: true,
            mounted: true,
        };

        let events = execute(snapshot, &stream).unwrap();
        stream.invalidate();

        assert!(events.is_empty());
        assert_eq!(stream.collect::<Vec<_>>().await, vec![snapshot]);
    }
}
