use crate::cli::error::CliResult;
use crate::config::ConfigStore;
use crate::flow::FlowMode;

/// Activate focus mode with the configured block list.
pub fn on(store: &ConfigStore, flow: &FlowMode) -> CliResult<String> {
    let settings = store.load();
    let blocked = flow.activate(&settings.blocked_sites)?;
    Ok(format!("🔒 Focus mode on, {} site(s) blocked", blocked))
}

/// Deactivate focus mode.
pub fn off(flow: &FlowMode) -> CliResult<String> {
    flow.deactivate()?;
    Ok("🔓 Focus mode off".to_string())
}

/// Report whether focus mode is active and what it would block.
pub fn status(store: &ConfigStore, flow: &FlowMode) -> CliResult<String> {
    let settings = store.load();
    let sites = if settings.blocked_sites.is_empty() {
        "none".to_string()
    } else {
        settings.blocked_sites.join(", ")
    };

    Ok(if flow.is_active()? {
        format!("🔒 Focus mode is on. Blocked: {}", sites)
    } else {
        format!("🔓 Focus mode is off. Block list: {}", sites)
    })
}

/// Add a site to the block list, applying it immediately when focus mode
/// is already on.
pub fn block(store: &ConfigStore, flow: &FlowMode, site: &str) -> CliResult<String> {
    let site = normalize(site);
    let mut settings = store.load();
    if settings.blocked_sites.iter().any(|s| *s == site) {
        return Ok(format!("{} is already on the block list.", site));
    }

    settings.blocked_sites.push(site.clone());
    store.save(&settings)?;
    if flow.is_active()? {
        flow.activate(&settings.blocked_sites)?;
    }
    Ok(format!("✓ Added {} to the block list", site))
}

/// Remove a site from the block list.
pub fn unblock(store: &ConfigStore, flow: &FlowMode, site: &str) -> CliResult<String> {
    let site = normalize(site);
    let mut settings = store.load();
    let before = settings.blocked_sites.len();
    settings.blocked_sites.retain(|s| *s != site);
    if settings.blocked_sites.len() == before {
        return Ok(format!("{} is not on the block list.", site));
    }

    store.save(&settings)?;
    if flow.is_active()? {
        if settings.blocked_sites.is_empty() {
            flow.deactivate()?;
        } else {
            flow.activate(&settings.blocked_sites)?;
        }
    }
    Ok(format!("✓ Removed {} from the block list", site))
}

fn normalize(site: &str) -> String {
    site.trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_lowercase()
}
