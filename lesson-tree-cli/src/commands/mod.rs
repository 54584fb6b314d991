pub(crate) mod audit;
pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod run;

use lesson_tree_lib::{HttpProbe, OfflineProbe, Probe, Settings};

use crate::CliError;

/// The network probe, or one that never connects.
pub(crate) fn build_probe(settings: &Settings, offline: bool) -> Result<Box<dyn Probe>, CliError> {
    if offline {
        log::info!("Offline mode: no correction can be confirmed, so none will be applied");
        return Ok(Box::new(OfflineProbe));
    }
    Ok(Box::new(HttpProbe::new(&settings.probe_options())?))
}
