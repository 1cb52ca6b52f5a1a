//! End-to-end host/guest synchronization over an in-process transport pair.

use glam::DVec2;
use prospector_items::ItemKind;
use prospector_net::memory;
use prospector_player::MoveInput;
use prospector_session::{ConnectionStatus, Session};
use prospector_sync::{PeerLink, Role};

const TICK_MS: f64 = 16.0;

fn idle() -> MoveInput {
    MoveInput::idle()
}

fn tick_both(host: &mut Session, guest: &mut Session, input_host: &MoveInput, ticks: usize) {
    for _ in 0..ticks {
        host.update(input_host, TICK_MS);
        guest.update(&idle(), TICK_MS);
    }
}

fn connected_sessions(seed: u32) -> (Session, Session) {
    let (host_side, guest_side) = memory::pair();
    let mut host = Session::host(seed, Box::new(host_side));
    let mut guest = Session::guest(Box::new(guest_side));
    tick_both(&mut host, &mut guest, &idle(), 1);
    assert_eq!(host.status(), ConnectionStatus::Connected);
    assert_eq!(guest.status(), ConnectionStatus::Connected);
    (host, guest)
}

#[test]
fn test_guest_adopts_host_world_snapshot() {
    let (guest_side, host_side) = memory::pair();
    let mut guest = Session::guest(Box::new(guest_side));
    let mut host = PeerLink::new(Box::new(host_side), Role::Host);
    host.poll();

    assert!(guest.terrain().is_none(), "no world before the snapshot");

    host.send_world_sync(
        42,
        &[prospector_items::WorldItem {
            id: "a".to_string(),
            kind: ItemKind::Gold,
            position: DVec2::new(10.0, 20.0),
        }],
        12_345.0,
    );
    guest.update(&idle(), TICK_MS);

    let terrain = guest.terrain().expect("snapshot builds the world");
    assert_eq!(terrain.seed(), 42);
    assert_eq!(terrain.loaded_count(), 9, "terrain streams in around the player");

    let item = guest.items().get("a").expect("synced item is live");
    assert_eq!(item.kind, ItemKind::Gold);
    assert_eq!(item.position, DVec2::new(10.0, 20.0));
    assert_eq!(guest.items().timer_ms(), 12_345.0);
}

#[test]
fn test_host_sends_snapshot_after_connect_delay() {
    let (mut host, mut guest) = connected_sessions(7);
    host.items_mut().spawn(ItemKind::Silver, DVec2::new(100.0, 100.0), None);

    // Well under the snapshot delay: nothing yet.
    tick_both(&mut host, &mut guest, &idle(), 10);
    assert!(guest.terrain().is_none());

    // Past 500 ms of host game time.
    tick_both(&mut host, &mut guest, &idle(), 30);
    let terrain = guest.terrain().expect("snapshot arrives after the delay");
    assert_eq!(terrain.seed(), 7);
    assert_eq!(guest.items().len(), 1, "pre-existing items are carried over");
}

#[test]
fn test_positions_replicate_and_interpolate() {
    let (mut host, mut guest) = connected_sessions(3);
    let run = MoveInput {
        right: true,
        ..MoveInput::idle()
    };

    // One second of the host running right at 200 units/sec.
    tick_both(&mut host, &mut guest, &run, 62);
    let remote = guest.remote().expect("host replica appears on the guest");
    assert_eq!(remote.id, "host");
    assert!(
        remote.position.x > 0.0,
        "replica should be moving right, at {:?}",
        remote.position
    );
    assert!(
        remote.position.x <= host.player().position.x,
        "interpolation trails the authoritative position"
    );

    // Once the host stops, the replica converges onto the final position.
    tick_both(&mut host, &mut guest, &idle(), 80);
    let remote = guest.remote().expect("replica persists");
    assert!(
        (remote.position - host.player().position).length() < 1.0,
        "replica converges once updates settle: {:?} vs {:?}",
        remote.position,
        host.player().position
    );
}

#[test]
fn test_collection_replicates_to_the_peer() {
    let (mut host, mut guest) = connected_sessions(5);
    // A snapshot-synced item next to both players (both start at the origin).
    host.items_mut().spawn(ItemKind::Gold, DVec2::new(200.0, 0.0), Some("nugget".to_string()));
    tick_both(&mut host, &mut guest, &idle(), 40);
    assert!(guest.items().get("nugget").is_some(), "snapshot delivered the item");

    // Host walks onto it; the guest hears about the collection.
    let run = MoveInput {
        right: true,
        ..MoveInput::idle()
    };
    tick_both(&mut host, &mut guest, &run, 70);
    assert_eq!(host.inventory().count(ItemKind::Gold), 1);
    assert!(host.items().get("nugget").is_none());
    assert!(
        guest.items().get("nugget").is_none(),
        "collection removes the item on the other peer too"
    );
    assert_eq!(guest.inventory().total(), 0, "only the collector's inventory grows");
}

#[test]
fn test_simultaneous_collection_is_not_an_error() {
    // Both players sit on the same item, so both collect it on the same frame
    // and each then receives a removal for an id that is already gone.
    let (mut host, mut guest) = connected_sessions(5);
    tick_both(&mut host, &mut guest, &idle(), 40);

    // Same item live on both sides, in collection range of both players.
    host.items_mut().spawn(ItemKind::Stone, DVec2::new(3.0, 0.0), Some("contested".to_string()));
    guest.items_mut().spawn(ItemKind::Stone, DVec2::new(3.0, 0.0), Some("contested".to_string()));

    tick_both(&mut host, &mut guest, &idle(), 4);

    assert!(host.items().get("contested").is_none());
    assert!(guest.items().get("contested").is_none());
    assert_eq!(host.inventory().count(ItemKind::Stone), 1);
    assert_eq!(guest.inventory().count(ItemKind::Stone), 1);
    assert_eq!(host.status(), ConnectionStatus::Connected);
    assert_eq!(guest.status(), ConnectionStatus::Connected);
    assert!(host.take_faults().is_empty());
    assert!(guest.take_faults().is_empty());
}

#[test]
fn test_drop_appears_on_the_peer() {
    let (mut host, mut guest) = connected_sessions(11);
    host.items_mut().spawn(ItemKind::Silver, DVec2::ZERO, None);
    tick_both(&mut host, &mut guest, &idle(), 40);
    assert_eq!(host.inventory().count(ItemKind::Silver), 1);

    // Walk away, then drop.
    let run = MoveInput {
        down: true,
        ..MoveInput::idle()
    };
    tick_both(&mut host, &mut guest, &run, 20);
    let dropped = host.drop_item(ItemKind::Silver).expect("stock was available");
    tick_both(&mut host, &mut guest, &idle(), 2);

    let on_guest = guest
        .items()
        .get(&dropped.id)
        .expect("drop replicates with its minted id");
    assert_eq!(on_guest.kind, ItemKind::Silver);
    assert_eq!(on_guest.position, dropped.position);
}

#[test]
fn test_spawn_timer_replicates_to_guest() {
    let (mut host, mut guest) = connected_sessions(2);
    host.items_mut().set_timer(250_000.0);
    tick_both(&mut host, &mut guest, &idle(), 2);
    assert!(
        guest.items().timer_ms() >= 250_000.0,
        "guest timer mirrors the host's accumulator"
    );
    assert_eq!(guest.spawn_countdown(), host.spawn_countdown());
}

#[test]
fn test_host_spawn_burst_replicates() {
    let (host_side, guest_side) = memory::pair();
    let mut host = Session::host(8, Box::new(host_side)).with_spawn_interval(100.0);
    let mut guest = Session::guest(Box::new(guest_side));
    tick_both(&mut host, &mut guest, &idle(), 1);

    // Enough ticks for at least one interval crossing on the host.
    tick_both(&mut host, &mut guest, &idle(), 10);
    assert!(!host.items().is_empty(), "host spawned autonomously");
    for item in host.items().items() {
        assert!(
            guest.items().get(&item.id).is_some(),
            "guest is missing spawned item {}",
            item.id
        );
    }
}

#[test]
fn test_disconnect_degrades_both_sides_to_solo() {
    let (mut host, mut guest) = connected_sessions(6);
    tick_both(&mut host, &mut guest, &idle(), 40);
    assert!(guest.terrain().is_some());

    guest.disconnect();
    host.update(&idle(), TICK_MS);
    assert_eq!(host.status(), ConnectionStatus::Disconnected);
    assert_eq!(guest.status(), ConnectionStatus::Disconnected);
    assert!(host.remote().is_none(), "replica player is dropped");

    // Both keep playing with the world they have.
    host.update(&idle(), TICK_MS);
    guest.update(&idle(), TICK_MS);
    assert!(host.terrain().is_some());
    assert!(guest.terrain().is_some());
}
