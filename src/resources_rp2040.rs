use assign_resources::assign_resources;
use embassy_rp::peripherals;
use embassy_rp::Peri;

assign_resources! {
    led: LedResources {
        led: PIN_25,
    },
    console: ConsoleResources {
        uart: UART0,
        tx: PIN_0,
        rx: PIN_1,
    },
}
