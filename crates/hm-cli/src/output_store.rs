use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use hm_core::HeroMlError;
use hm_runtime::GlobalEnvironment;
use serde_json::{Map, Value as JsonValue};
use tracing::info;

use crate::{map_cli_output_encode, map_cli_output_write};

pub(crate) fn default_filename(now: DateTime<Utc>) -> String {
    format!(
        "response_{}.json",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

pub(crate) fn environment_json(environment: &GlobalEnvironment) -> JsonValue {
    JsonValue::Object(
        environment
            .values()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect::<Map<_, _>>(),
    )
}

pub(crate) fn save_environment(
    output_dir: &Path,
    filename: &str,
    environment: &GlobalEnvironment,
) -> Result<PathBuf, HeroMlError> {
    fs::create_dir_all(output_dir).map_err(map_cli_output_write)?;

    let path = output_dir.join(filename);
    let payload =
        serde_json::to_string_pretty(&environment_json(environment)).map_err(map_cli_output_encode)?;
    fs::write(&path, payload).map_err(map_cli_output_write)?;
    info!(path = %path.display(), keys = environment.len(), "saved environment");
    Ok(path)
}
