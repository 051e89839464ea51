extern crate std;

use async_io::Async;
use embedded_io_adapters::futures_03::FromFutures;

use crate::console::run_console;
use crate::log::error;
use crate::AppDispatcher;

/// Console on the terminal. Both ends go through the async-io reactor since
/// stdin and stdout usually share one non-blocking tty description.
#[embassy_executor::task]
pub async fn console_task(dispatcher: AppDispatcher) {
    let stdin = match Async::new(std::io::stdin()) {
        Ok(stdin) => stdin,
        Err(err) => {
            error!("Cannot poll stdin: {}", err);
            return;
        }
    };
    let stdout = match Async::new(std::io::stdout()) {
        Ok(stdout) => stdout,
        Err(err) => {
            error!("Cannot poll stdout: {}", err);
            return;
        }
    };

    run_console(FromFutures::new(stdin), FromFutures::new(stdout), dispatcher).await
}
