//! Controller task - the outer polling loop

use defmt::*;
use embassy_futures::yield_now;

use crate::board::JigController;

/// Run the jig controller forever
///
/// Every `tick()` is non-blocking; motion only advances while this loop
/// spins, so it yields instead of sleeping.
#[embassy_executor::task]
pub async fn controller_task(controller: &'static mut JigController) {
    info!("Controller task started");

    controller.initialize();
    info!("Controller initialized in {:?}", controller.mode());

    loop {
        controller.tick();
        yield_now().await;
    }
}
