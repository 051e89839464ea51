use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config};
use static_cell::StaticCell;

use crate::console::run_console;
use crate::resources::ConsoleResources;
use crate::AppDispatcher;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

const UART_BUFFER_SIZE: usize = 64;

#[embassy_executor::task]
pub async fn console_task(r: ConsoleResources, dispatcher: AppDispatcher) {
    static TX_BUF: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; UART_BUFFER_SIZE]> = StaticCell::new();
    let tx_buf = &mut TX_BUF.init([0; UART_BUFFER_SIZE])[..];
    let rx_buf = &mut RX_BUF.init([0; UART_BUFFER_SIZE])[..];

    let mut config = Config::default();
    config.baudrate = 115_200;

    let uart = BufferedUart::new(r.uart, r.tx, r.rx, Irqs, tx_buf, rx_buf, config);
    let (tx, rx) = uart.split();

    run_console(rx, tx, dispatcher).await
}
