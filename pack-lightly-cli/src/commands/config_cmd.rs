use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;

use crate::config::Config;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("api_url: {}", config.api_url.value);
                        println!("  source: {}", config.api_url.source);
                        println!();

                        match config.default_list {
                            Some(list) => println!("default_list: {}", list),
                            None => println!("default_list: (not set)"),
                        }
                        println!();

                        if config.auth.is_configured() {
                            println!("auth: token configured");
                        } else {
                            println!("auth: no token (set auth.token or PACK_API_TOKEN)");
                        }
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let path = Config::default_config_path();
                if path.exists() {
                    return Err(format!(
                        "Config file already exists: {}",
                        path.display()
                    )
                    .into());
                }

                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&path)?;
                writeln!(file, "# PackLightly configuration")?;
                writeln!(file, "#")?;
                writeln!(file, "# api_url: https://api.packlightly.app")?;
                writeln!(file, "# default_list: 00000000-0000-0000-0000-000000000000")?;
                writeln!(file, "# auth:")?;
                writeln!(file, "#   token: your-api-token")?;

                println!("Created {}", path.display());
                Ok(())
            }
        }
    }
}
