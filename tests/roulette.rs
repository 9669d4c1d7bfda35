use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use spinwheel::{
    DeviceError, FlashPolicy, IOCTL_GET_WINNING_LED, Landing, OutputBank, RingError, Roulette,
    SeededSelector, SimulatedBank, SpinCadence, SpinState, WheelConfig,
};
use tokio::time::Instant;

fn wheel(cfg: WheelConfig, seed: u64) -> (Arc<Roulette>, Arc<SimulatedBank>) {
    let bank = Arc::new(SimulatedBank::new(cfg.lines.clone()));
    let wheel = Roulette::builder(cfg)
        .with_selector(Arc::new(SeededSelector::new(seed)))
        .build(bank.clone())
        .expect("build wheel");
    (wheel, bank)
}

/// Replays the write history and checks that every "on" write leaves exactly
/// that one line lit. Returns the lines switched on, in order.
fn lit_sequence(history: &[(u32, bool)]) -> Vec<u32> {
    let mut lit = BTreeSet::new();
    let mut seq = Vec::new();
    for &(line, on) in history {
        if on {
            lit.insert(line);
            assert_eq!(lit, BTreeSet::from([line]), "more than one slot lit");
            seq.push(line);
        } else {
            lit.remove(&line);
        }
    }
    seq
}

#[tokio::test(start_paused = true)]
async fn reference_spin_end_to_end() {
    let (wheel, bank) = wheel(WheelConfig::default(), 1);
    bank.clear_history();
    let mut dev = wheel.open().unwrap();

    let started = Instant::now();
    assert_eq!(dev.write(b"spin\n").await, Ok(5));
    let elapsed = started.elapsed();

    // 40 steps of 50ms + 2ms·i, then 5 × 1s of flashing.
    assert!(elapsed >= Duration::from_millis(8560), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(8700), "elapsed {elapsed:?}");

    let winner = wheel.coordinator().peek_result().expect("winner committed");
    assert!(winner < 8);

    let seq = lit_sequence(&bank.history());
    assert_eq!(seq.len(), 40 + 5 + 1);
    let lines = &wheel.config().lines;
    for (i, line) in seq[..40].iter().enumerate() {
        assert_eq!(*line, lines[i % 8]);
    }
    assert!(seq[40..].iter().all(|l| *l == lines[winner]));
    assert_eq!(bank.lit(), vec![lines[winner]]);

    let st = wheel.status();
    assert_eq!(st.state, SpinState::Settled);
    assert_eq!(st.spins, 1);
    assert_eq!(
        wheel.status_file(),
        format!("Winning LED: {winner}\nSpin count: 1\n")
    );

    let mut buf = [0u8; 16];
    let n = dev.read(&mut buf).await.unwrap();
    assert_eq!(&buf[..n], format!("{winner}\n").as_bytes());
    assert_eq!(dev.read(&mut buf).await, Ok(0));

    let mut arg = [0u8; 4];
    dev.ioctl(IOCTL_GET_WINNING_LED, &mut arg).unwrap();
    assert_eq!(i32::from_ne_bytes(arg), winner as i32);

    wheel.shutdown().await;
    assert!(bank.claimed_by("spinwheel").is_empty());
    assert!(bank.lit().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_concurrent_spin_is_rejected() {
    let (wheel, _bank) = wheel(WheelConfig::default(), 2);
    let mut a = wheel.open().unwrap();
    let mut b = wheel.open().unwrap();

    let (ra, rb) = tokio::join!(a.write(b"1"), b.write(b"1"));
    let errors: Vec<_> = [ra, rb].into_iter().filter_map(Result::err).collect();
    assert_eq!(errors, vec![DeviceError::Busy]);
    assert_eq!(errors[0].errno(), 16);
    assert_eq!(wheel.status().spins, 1);
}

#[tokio::test(start_paused = true)]
async fn blocked_readers_all_see_the_same_winner() {
    let (wheel, _bank) = wheel(WheelConfig::default(), 3);

    let spin = tokio::spawn({
        let wheel = wheel.clone();
        async move { wheel.open().unwrap().write(b"go").await }
    });
    let mut rx = wheel.coordinator().subscribe();
    rx.wait_for(|s| s.state() == SpinState::Spinning).await.unwrap();

    let readers: Vec<_> = (0..5)
        .map(|_| {
            let mut dev = wheel.open().unwrap();
            tokio::spawn(async move {
                let mut buf = [0u8; 16];
                let n = dev.read(&mut buf).await.unwrap();
                String::from_utf8_lossy(&buf[..n]).into_owned()
            })
        })
        .collect();

    assert_eq!(spin.await.unwrap(), Ok(2));
    let winner = wheel.coordinator().peek_result().unwrap();
    for r in readers {
        assert_eq!(r.await.unwrap(), format!("{winner}\n"));
    }
}

#[tokio::test(start_paused = true)]
async fn claim_conflict_leaves_nothing_claimed() {
    let cfg = WheelConfig::default();
    let bank = Arc::new(SimulatedBank::new(cfg.lines.clone()));
    bank.hold(cfg.lines[5], "heartbeat-led");

    let err = Roulette::builder(cfg.clone())
        .build(bank.clone())
        .err()
        .expect("claim must fail");
    assert!(matches!(err, RingError::ResourceUnavailable { slot: 5, .. }));
    assert!(bank.claimed_by("spinwheel").is_empty());
    assert_eq!(bank.owner(cfg.lines[5]).as_deref(), Some("heartbeat-led"));

    // Once the other owner lets go the wheel starts normally.
    bank.release(cfg.lines[5]);
    let wheel = Roulette::builder(cfg).build(bank.clone()).expect("retry");
    assert_eq!(bank.claimed_by("spinwheel").len(), 8);
    wheel.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn landing_on_winner_ends_the_chase_on_it() {
    let cfg = WheelConfig {
        cadence: SpinCadence {
            landing: Landing::OnWinner,
            ..SpinCadence::default()
        },
        flash: FlashPolicy {
            times: 0,
            ..FlashPolicy::default()
        },
        hold_winner: false,
        ..WheelConfig::default()
    };
    let (wheel, bank) = wheel(cfg, 9);

    for _ in 0..3 {
        bank.clear_history();
        let winner = wheel.coordinator().trigger().await.unwrap();
        let seq = lit_sequence(&bank.history());
        assert_eq!(seq.last(), Some(&wheel.config().lines[winner]));
        assert!(seq.len() >= 40 && seq.len() < 48);
        assert!(bank.lit().is_empty());
    }
    assert_eq!(wheel.status().spins, 3);
}

#[tokio::test(start_paused = true)]
async fn spins_are_counted_and_reads_rearm() {
    let (wheel, _bank) = wheel(WheelConfig::default(), 4);
    let mut dev = wheel.open().unwrap();
    let mut buf = [0u8; 16];

    for k in 1..=3u64 {
        dev.write(b"x").await.unwrap();
        assert_eq!(wheel.status().spins, k);
        assert!(dev.read(&mut buf).await.unwrap() > 0);
        assert_eq!(dev.read(&mut buf).await, Ok(0));
    }
}
