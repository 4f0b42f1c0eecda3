mod api;
mod bootstrap;
mod dom;
mod error;
mod models;
mod settings;
#[cfg(test)]
mod testing;
mod tracker;
mod transactions;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("finance tracker frontend starting");

    if let Err(err) = bootstrap::run() {
        log::error!("startup failed: {}", err);
    }
}
