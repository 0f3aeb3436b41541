use crate::args;
use crate::error::*;

/// Load the settings and report whether they are valid
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "CONFIG")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let source = self.config.load_source()?;
        let config = self.config.resolve(&source)?;
        log::debug!(
            "{} by {}, {} plugin(s), {} feed(s)",
            config.site_name(),
            config.author(),
            config.enabled_plugins().len(),
            config.feed_settings().iter().count()
        );

        match &self.config.profile {
            Some(profile) => log::info!("`{}` is valid with profile `{profile}`", source.origin()),
            None => log::info!("`{}` is valid", source.origin()),
        }

        Ok(())
    }
}
