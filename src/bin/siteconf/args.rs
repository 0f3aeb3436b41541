use std::env;
use std::io::Write;
use std::path;

use crate::error::*;

#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Settings file to use [default: nearest `_site.{yml,yaml,toml,json}`]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Profile to apply on top of the base settings
    #[arg(short, long, value_name = "NAME")]
    pub(crate) profile: Option<String>,
}

impl ConfigArgs {
    pub(crate) fn load_source(&self) -> Result<siteconf_config::SettingsSource> {
        let source = if let Some(config_path) = &self.config {
            siteconf_config::SettingsSource::from_file(config_path)
                .with_context(|| format!("Error reading settings file {}", config_path.display()))?
        } else {
            let cwd = env::current_dir().context("Cannot determine the current directory")?;
            siteconf_config::SettingsSource::from_cwd(cwd)?
        };
        log::debug!("Loaded settings from `{}`", source.origin());
        Ok(source)
    }

    pub(crate) fn load_config(&self) -> Result<siteconf_config::SiteConfiguration> {
        let source = self.load_source()?;
        self.resolve(&source)
    }

    pub(crate) fn resolve(
        &self,
        source: &siteconf_config::SettingsSource,
    ) -> Result<siteconf_config::SiteConfiguration> {
        let config = source
            .resolve(self.profile.as_deref())
            .with_context(|| format!("Invalid settings in {}", source.origin()))?;
        Ok(config)
    }
}

pub(crate) fn init_logging(level: log::LevelFilter) {
    let write_style = match colorchoice::ColorChoice::global() {
        colorchoice::ColorChoice::Always | colorchoice::ColorChoice::AlwaysAnsi => {
            env_logger::WriteStyle::Always
        }
        colorchoice::ColorChoice::Never => env_logger::WriteStyle::Never,
        colorchoice::ColorChoice::Auto => env_logger::WriteStyle::Auto,
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(write_style);
    builder.filter(None, level);
    builder.format(|f, record| {
        let level = record.level().to_string().to_lowercase();
        writeln!(f, "[{level}] {}", record.args())
    });
    builder.init();
}
