//! Bridges global CLI flags onto the shared contiv-config loader.

use secrecy::SecretString;

use contiv_api::ConnectionConfig;
use contiv_config::{Config, Overrides};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Flags given on the command line, as the top configuration layer.
pub fn overrides(global: &GlobalOpts) -> Overrides {
    Overrides {
        host: global.host.clone(),
        port: global.port,
        user: global.user.clone(),
        password: None,
        url: global.url.clone(),
        timeout: global.timeout,
        ca_cert: global.ca_cert.clone(),
        verify_tls: global.verify_tls.then_some(true),
    }
}

/// Load the effective configuration: file, `CONTIV_*` env, then flags.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(contiv_config::load_config(
        global.config.as_deref(),
        &overrides(global),
    )?)
}

/// Resolve everything needed to reach the controller, prompting for the
/// password when `--ask-password` is given.
pub fn connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = load(global)?;
    let mut conn = cfg.to_connection_config()?;

    if global.ask_password {
        let prompt = format!("Password for {}: ", cfg.keyring_account());
        let pw = rpassword::prompt_password(prompt)?;
        conn.password = SecretString::from(pw);
    }

    Ok(conn)
}
