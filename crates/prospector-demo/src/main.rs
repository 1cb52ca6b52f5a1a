//! Headless two-peer demo.
//!
//! Runs a host and a guest session joined by an in-process transport and
//! drives them with fixed ticks and scripted input: the guest connects,
//! receives the world snapshot, watches the host collect and drop items, and
//! finally the host disconnects and both continue solo. Everything observable
//! goes through `tracing`; run with `RUST_LOG=debug` for protocol detail.

use std::path::Path;

use glam::DVec2;
use prospector_config::Config;
use prospector_items::ItemKind;
use prospector_net::memory;
use prospector_player::MoveInput;
use prospector_session::{ConnectionStatus, Session};
use tracing::info;

const TICK_MS: f64 = 16.0;
const WORLD_SEED: u32 = 2024;

fn main() {
    let config = Config::load_or_create(Path::new("config")).unwrap_or_else(|e| {
        eprintln!("config unavailable ({e}), using defaults");
        Config::default()
    });
    prospector_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let (host_side, guest_side) = memory::pair();
    let mut host = Session::host(WORLD_SEED, Box::new(host_side))
        .with_config(&config)
        .with_spawn_interval(config.items.spawn_interval_ms.min(4_000.0));
    let mut guest = Session::guest(Box::new(guest_side)).with_config(&config);

    // Something for the host to find along its scripted walk.
    host.items_mut()
        .spawn(ItemKind::Gold, DVec2::new(150.0, 0.0), None);
    host.items_mut()
        .spawn(ItemKind::Silver, DVec2::new(300.0, 0.0), None);

    info!(seed = WORLD_SEED, "sessions created, simulating");

    let east = MoveInput {
        right: true,
        ..MoveInput::idle()
    };
    let idle = MoveInput::idle();

    // Phase 1: connect, snapshot, and a two-second walk east over the items.
    run(&mut host, &mut guest, &east, 125);
    report("after the walk", &host, &guest);

    // Phase 2: drop the gold where the host now stands, then stand still
    // long enough for an autonomous spawn burst.
    if host.drop_item(ItemKind::Gold).is_some() {
        info!("host dropped its gold");
    }
    run(&mut host, &mut guest, &idle, 250);
    report("after the spawn interval", &host, &guest);

    // Phase 3: the host leaves; the guest keeps its copy of the world.
    host.disconnect();
    run(&mut host, &mut guest, &idle, 10);
    assert_eq!(guest.status(), ConnectionStatus::Disconnected);
    report("after the host left", &host, &guest);

    info!("demo complete");
}

fn run(host: &mut Session, guest: &mut Session, host_input: &MoveInput, ticks: usize) {
    for _ in 0..ticks {
        host.update(host_input, TICK_MS);
        guest.update(&MoveInput::idle(), TICK_MS);
        for fault in host.take_faults().into_iter().chain(guest.take_faults()) {
            tracing::warn!(%fault, "link fault");
        }
    }
}

fn report(phase: &str, host: &Session, guest: &Session) {
    info!(
        phase,
        host_pos = ?host.player().position,
        host_gold = host.inventory().count(ItemKind::Gold),
        host_silver = host.inventory().count(ItemKind::Silver),
        live_items_host = host.items().len(),
        live_items_guest = guest.items().len(),
        guest_world = guest.terrain().is_some(),
        next_spawn = %host.spawn_countdown(),
        "state"
    );
    if let Some(remote) = guest.remote() {
        info!(id = %remote.id, pos = ?remote.position, "host as seen by the guest");
    }
}
