//! # Example: wheel
//!
//! Runs the wheel as a long-lived service: spins every few seconds until the
//! process receives SIGINT/SIGTERM/SIGQUIT (Ctrl-C elsewhere), then releases
//! every line.
//!
//! Uses the sysfs GPIO host when `/sys/class/gpio` is present, otherwise an
//! in-memory host.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► pick host: SysfsBank (real board) or SimulatedBank
//!   ├─► Roulette::builder(cfg).with_subscribers([LogWriter]).build(host)
//!   ├─► spinner task (every 10s):
//!   │     ├─► coordinator.trigger()        Busy → skip this tick
//!   │     └─► print status_file()
//!   └─► run_until_signal()
//!         ├─► publish ShutdownRequested
//!         ├─► wait for the running spin
//!         └─► release the ring → RingReleased
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example wheel --features logging
//! ```

use std::{path::Path, sync::Arc, time::Duration};

use spinwheel::{
    LogWriter, OutputBank, Roulette, SYSFS_GPIO_ROOT, SimulatedBank, SpinError, Subscribe,
    SysfsBank, WheelConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== wheel example ===\n");

    // 1. Configure runtime
    let cfg = WheelConfig {
        bus_capacity: 256,
        ..WheelConfig::default()
    };

    // 2. Pick the output host
    let bank: Arc<dyn OutputBank> = if Path::new(SYSFS_GPIO_ROOT).is_dir() {
        Arc::new(SysfsBank::default())
    } else {
        Arc::new(SimulatedBank::new(cfg.lines.clone()))
    };
    println!("host: {}", bank.name());

    // 3. Build the wheel
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let wheel = Roulette::builder(cfg).with_subscribers(subs).build(bank)?;

    // 4. Spin periodically
    let spinner = tokio::spawn({
        let wheel = Arc::clone(&wheel);
        async move {
            let mut tick = tokio::time::interval(Duration::from_secs(10));
            loop {
                tick.tick().await;
                match wheel.coordinator().trigger().await {
                    Ok(_) => print!("{}", wheel.status_file()),
                    Err(SpinError::Busy) => continue,
                    Err(e) => {
                        println!("spinner stopped: {e}");
                        break;
                    }
                }
            }
        }
    });

    // 5. Wait for a stop signal, then release everything
    wheel.run_until_signal().await?;
    spinner.abort();

    println!("\n=== done ===");
    Ok(())
}
