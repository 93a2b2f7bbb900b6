use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use weather_lookup::{Config, ErrorEnvelope, NwsClient, lookup_weather, parse_coordinate};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather lookup HTTP service")]
pub struct Cli {
    /// TOML config file; defaults to the platform config directory.
    #[arg(long, global = true, env = "WEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Settings that take precedence over the config file.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Address to bind the listener to.
    #[arg(long, global = true, env = "WEATHER_BIND")]
    pub bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, global = true, env = "WEATHER_PORT")]
    pub port: Option<u16>,

    /// Base URL of the upstream points endpoint.
    #[arg(long, global = true, env = "WEATHER_POINTS_BASE_URL")]
    pub points_base_url: Option<String>,

    /// Timeout for each upstream call, in milliseconds.
    #[arg(long, global = true, env = "WEATHER_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.points_base_url {
            config.upstream.points_base_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.upstream.timeout_ms = ms;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (the default).
    Serve,

    /// Look up one coordinate and print the result as JSON.
    Lookup {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,

        #[arg(long, allow_hyphen_values = true)]
        lon: String,
    },

    /// Print the effective configuration.
    Config {
        /// Also save it to the config file.
        #[arg(long)]
        write: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&path)?;
        self.overrides.apply(&mut config);

        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => server::serve(config).await,
            Command::Lookup { lat, lon } => {
                let source = NwsClient::new(&config.upstream)?;
                let outcome = match parse_coordinate(Some(&lat), Some(&lon)) {
                    Ok(coordinate) => lookup_weather(&source, &coordinate).await,
                    Err(err) => Err(err),
                };

                match outcome {
                    Ok(result) => {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                        Ok(())
                    }
                    Err(err) => {
                        let envelope = ErrorEnvelope::from(&err);
                        println!("{}", serde_json::to_string_pretty(&envelope)?);
                        Err(anyhow::Error::from(err).context("Weather lookup failed"))
                    }
                }
            }
            Command::Config { write } => {
                print!("{}", config.to_toml()?);
                if write {
                    config.save_to(&path)?;
                    eprintln!("Saved configuration to {}", path.display());
                }
                Ok(())
            }
        }
    }
}
