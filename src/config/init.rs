// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates nimbus.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, region: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(region.unwrap_or("us-east-1"));
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(region: &str) -> String {
    format!(
        r#"# Credentials may be literals, or references to environment
# variables so this file can be committed without the secret in it.
access_key_id:
  env: AWS_ACCESS_KEY_ID
secret_access_key:
  env: AWS_SECRET_ACCESS_KEY

region: {region}

# Memoize the registered-image listing for the session's lifetime.
# cache: true

# Upper bound on a single remote call.
# operation_timeout: 30s

# removal:
#   max_passes: 3
"#
    )
}
