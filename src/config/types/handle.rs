//! Global config with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads. Readers call [`cfg`] at the point of
//! use instead of holding on to a copy, so a replaced config is picked up by
//! the next call.

use crate::config::FolioConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<FolioConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(FolioConfig::default()));

#[inline]
pub fn cfg() -> Arc<FolioConfig> {
    CONFIG.load_full()
}

/// Install the startup config and return a handle to it.
#[inline]
pub fn init_config(config: FolioConfig) -> Arc<FolioConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}

/// Apply `update` to a copy of the current config and swap it in.
pub fn update_config(update: impl FnOnce(&mut FolioConfig)) -> Arc<FolioConfig> {
    let mut config = (*cfg()).clone();
    update(&mut config);
    init_config(config)
}
