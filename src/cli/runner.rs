//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs, OutputFormat, ReplaceSettingsArgs};
use crate::error::{Error, Result, ResultExt};
use crate::service::{
    ClientOptions, ConfigurationAggregatorClient, GetResourceCollectionStatusOptions,
    GetSettingsOptions, ManualReconcileOptions,
};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    client: ConfigurationAggregatorClient,
}

impl Runner {
    /// Create a runner whose client comes from external configuration
    pub fn new(cli: Cli) -> Result<Self> {
        let mut options = ClientOptions::new();
        if let Some(url) = &cli.url {
            options = options.url(url.clone());
        }
        let client = ConfigurationAggregatorClient::from_external_config(options)
            .context("Failed to configure client from credentials file or environment")?;
        Ok(Self { cli, client })
    }

    /// Create a runner around an existing client
    pub fn with_client(cli: Cli, client: ConfigurationAggregatorClient) -> Self {
        Self { cli, client }
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.run_to(&mut stdout).await
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        debug!("Using service URL {}", self.client.service_url());

        match &self.cli.command {
            Commands::ListConfigs(args) => self.list_configs(args, out).await,
            Commands::GetSettings => {
                let settings = self.client.get_settings(&GetSettingsOptions::new()).await?;
                self.output(out, &settings)
            }
            Commands::ReplaceSettings(args) => self.replace_settings(args, out).await,
            Commands::Status => {
                let status = self
                    .client
                    .get_resource_collection_status(&GetResourceCollectionStatusOptions::new())
                    .await?;
                self.output(out, &status)
            }
            Commands::Reconcile => {
                let response = self
                    .client
                    .manual_reconcile(&ManualReconcileOptions::new())
                    .await?;
                self.output(out, &response)
            }
        }
    }

    async fn list_configs<W: Write>(&self, args: &ListArgs, out: &mut W) -> Result<()> {
        let options = args.to_options();
        let mut pager = self.client.configs_pager(&options)?;

        if args.all {
            let configs = pager.get_all().await?;
            info!("Fetched {} configs", configs.len());
            return self.output(out, &configs);
        }

        while pager.has_next() {
            let page = pager.next_page().await?;
            self.output(out, &page)?;
        }
        info!(
            "Fetched {} configs across {} pages",
            pager.state().total_fetched,
            pager.state().pages
        );
        Ok(())
    }

    async fn replace_settings<W: Write>(
        &self,
        args: &ReplaceSettingsArgs,
        out: &mut W,
    ) -> Result<()> {
        let settings = self.client.replace_settings(&args.to_options()).await?;
        self.output(out, &settings)
    }

    /// Write one value in the selected format
    fn output<W: Write, T: Serialize>(&self, out: &mut W, value: &T) -> Result<()> {
        let rendered = render(self.cli.format, value)?;
        writeln!(out, "{}", rendered.trim_end())?;
        Ok(())
    }
}

/// Render a value in the given format
pub fn render<T: Serialize>(format: OutputFormat, value: &T) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::Pretty => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| Error::Other(format!("Failed to render YAML: {e}"))),
    }
}
