use log::trace;

use crate::{
    core::TransitionError,
    dx::transition::{event_engine::TransitionEvent, AttachmentSlot},
};

pub(super) fn execute(attachment: &AttachmentSlot) -> Result<Vec<TransitionEvent>, TransitionError> {
    if !attachment.force_layout() {
        trace!("No element bound. Skipping layout flush");
    }

    Ok(vec![])
}
