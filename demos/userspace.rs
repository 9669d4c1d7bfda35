//! # Example: userspace
//!
//! Drives the wheel the way a userspace client drives the character device.
//!
//! Shows how to:
//! - Build a [`Roulette`] over a simulated output host
//! - Start a spin with `write`
//! - Block on `read` from a second handle until the spin settles
//! - Query the winner with the fast `ioctl` path and print the status file
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Roulette::builder(cfg).build(SimulatedBank)
//!   ├─► writer task: open() → write("1")
//!   │     ├─► publish SpinStarted
//!   │     ├─► chase 40 steps, commit winner → WinnerCommitted
//!   │     └─► flash winner → SpinSettled
//!   ├─► reader task: open() → read()   (blocks while Spinning)
//!   │     └─► wakes with "<winner>\n"
//!   └─► shutdown() → RingReleased
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example userspace --features logging
//! ```

use std::sync::Arc;

use spinwheel::{
    IOCTL_GET_WINNING_LED, LogWriter, Roulette, SimulatedBank, SpinState, Subscribe, WheelConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== userspace example ===\n");

    // 1. Configure the wheel (reference board lines, reference cadence)
    let cfg = WheelConfig::default();
    let bank = Arc::new(SimulatedBank::new(cfg.lines.clone()));

    // 2. Build it with the built-in log subscriber
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let wheel = Roulette::builder(cfg).with_subscribers(subs).build(bank)?;

    // 3. Writer: starts the spin
    println!("Starting roulette spin...");
    let mut watch = wheel.coordinator().subscribe();
    let writer = tokio::spawn({
        let wheel = Arc::clone(&wheel);
        async move { wheel.open()?.write(b"1").await }
    });
    watch
        .wait_for(|s| s.state() == SpinState::Spinning)
        .await?;

    // 4. Reader: blocks until the spin settles
    let reader = tokio::spawn({
        let wheel = Arc::clone(&wheel);
        async move {
            let mut dev = wheel.open()?;
            let mut buf = [0u8; 16];
            let n = dev.read(&mut buf).await?;
            Ok::<_, spinwheel::DeviceError>(String::from_utf8_lossy(&buf[..n]).into_owned())
        }
    });

    let line = reader.await??;
    writer.await??;
    print!("Winning LED: {line}");

    // 5. Fast path and status file
    let dev = wheel.open()?;
    let mut arg = [0u8; 4];
    dev.ioctl(IOCTL_GET_WINNING_LED, &mut arg)?;
    println!("ioctl winner: {}", i32::from_ne_bytes(arg));
    print!("{}", wheel.status_file());

    wheel.shutdown().await;
    println!("\n=== done ===");
    Ok(())
}
