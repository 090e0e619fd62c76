use tempfile::TempDir;

use super::flow;
use crate::config::ConfigStore;
use crate::flow::FlowMode;

fn setup() -> (ConfigStore, FlowMode, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store = ConfigStore::open(tmp.path()).expect("config store");
    let hosts = tmp.path().join("hosts");
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();
    (store, FlowMode::with_hosts_path(hosts), tmp)
}

#[test]
fn on_blocks_the_configured_sites() {
    let (store, flow_mode, _tmp) = setup();

    let output = flow::on(&store, &flow_mode).unwrap();

    assert!(output.contains("Focus mode on"));
    assert!(flow_mode.is_active().unwrap());
}

#[test]
fn block_normalizes_and_deduplicates() {
    let (store, flow_mode, _tmp) = setup();

    let output = flow::block(&store, &flow_mode, "https://Example.com/").unwrap();
    assert!(output.contains("✓ Added example.com"));

    let repeat = flow::block(&store, &flow_mode, "example.com").unwrap();
    assert!(repeat.contains("already on the block list"));

    assert_eq!(
        store
            .load()
            .blocked_sites
            .iter()
            .filter(|s| *s == "example.com")
            .count(),
        1
    );
}

#[test]
fn block_while_active_takes_effect_immediately() {
    let (store, flow_mode, tmp) = setup();
    flow::on(&store, &flow_mode).unwrap();

    flow::block(&store, &flow_mode, "example.com").unwrap();

    let hosts = std::fs::read_to_string(tmp.path().join("hosts")).unwrap();
    assert!(hosts.contains("127.0.0.1 example.com"));
}

#[test]
fn unblock_removes_the_site() {
    let (store, flow_mode, _tmp) = setup();
    flow::block(&store, &flow_mode, "example.com").unwrap();

    let output = flow::unblock(&store, &flow_mode, "example.com").unwrap();

    assert!(output.contains("✓ Removed example.com"));
    assert!(!store.load().blocked_sites.contains(&"example.com".to_string()));

    let missing = flow::unblock(&store, &flow_mode, "example.com").unwrap();
    assert!(missing.contains("not on the block list"));
}

#[test]
fn status_reports_both_states() {
    let (store, flow_mode, _tmp) = setup();

    assert!(flow::status(&store, &flow_mode).unwrap().contains("off"));
    flow::on(&store, &flow_mode).unwrap();
    assert!(flow::status(&store, &flow_mode).unwrap().contains("is on"));
}
