use std::path::Path;
use std::thread;

use truckstock_recon::model::{OnHandItem, TemplateItem};

use crate::error::InputError;
use crate::normalize::{parse_on_hand_file, parse_template_file};

/// Parse both input files in parallel.
///
/// Returns both record sets or the first error (template before on-hand).
/// Nothing partial is returned.
pub fn load_inputs(
    template: &Path,
    on_hand: &Path,
) -> Result<(Vec<TemplateItem>, Vec<OnHandItem>), InputError> {
    thread::scope(|s| {
        let template_job = s.spawn(|| parse_template_file(template));
        let on_hand_job = s.spawn(|| parse_on_hand_file(on_hand));

        let template_items = join(template_job);
        let on_hand_items = join(on_hand_job);
        Ok((template_items?, on_hand_items?))
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
