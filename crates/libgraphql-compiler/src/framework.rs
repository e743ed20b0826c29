use crate::config::Config;
use crate::config::Framework;
use crate::writer::FileWriter;

const KIT_ADAPTER: &str = "\
import { goto as go } from '$app/navigation'
import { getStores } from '$app/stores'

export function getSession() {
    return getStores().session
}

export function goTo(location, options) {
    go(location, options)
}
";

const SAPPER_ADAPTER: &str = "\
import { goto as go, stores } from '@sapper/app'

export function getSession() {
    return stores().session
}

export function goTo(location, options) {
    go(location, options)
}
";

impl Framework {
    /// Source of the runtime adapter module for this framework.
    pub fn adapter_source(&self) -> &'static str {
        match self {
            Self::Kit => KIT_ADAPTER,
            Self::Sapper => SAPPER_ADAPTER,
        }
    }
}

/// Writes the framework-specific runtime adapter to
/// [`Config::adapter_path()`].
pub fn write_adapter(
    config: &Config,
    writer: &dyn FileWriter,
) -> std::io::Result<()> {
    writer.write_file(&config.adapter_path(), config.framework.adapter_source())
}
