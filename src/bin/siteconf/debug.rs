use crate::args;
use crate::error::*;

/// Print resolved settings
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the normalized settings
    Config {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },

    /// Prints the declared profile names
    Profiles {
        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },

    /// Prints the enabled plugins in evaluation order
    Plugins {
        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },

    /// Prints the enabled feeds and their output paths
    Feeds {
        #[command(flatten, next_help_heading = "CONFIG")]
        config: args::ConfigArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Yaml,
    Toml,
    Json,
}

impl From<OutputFormat> for siteconf_config::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => siteconf_config::Format::Yaml,
            OutputFormat::Toml => siteconf_config::Format::Toml,
            OutputFormat::Json => siteconf_config::Format::Json,
        }
    }
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { format, config } => {
                let config = config.load_config()?;
                let mut text = config.to_source((*format).into())?;
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                print!("{text}");
            }
            Self::Profiles { config } => {
                let source = config.load_source()?;
                for name in source.profiles() {
                    println!("{name}");
                }
            }
            Self::Plugins { config } => {
                let config = config.load_config()?;
                for plugin in config.enabled_plugins() {
                    println!("{plugin}");
                }
            }
            Self::Feeds { config } => {
                let config = config.load_config()?;
                for (kind, path) in config.feed_settings().iter() {
                    println!("{kind}\t{path}");
                }
            }
        }

        Ok(())
    }
}
