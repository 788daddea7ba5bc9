//! CLI commands and argument parsing

use crate::models::{AdditionalScope, ProfileTemplate};
use crate::service::{ListConfigsOptions, ReplaceSettingsOptions};
use clap::{Args, Parser, Subcommand};

/// Configuration Aggregator CLI
///
/// Credentials are read from `ibm-credentials.env` or from
/// `CONFIGURATION_AGGREGATOR_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "config-aggregator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service URL (overrides CONFIGURATION_AGGREGATOR_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List collected resource configurations
    ListConfigs(ListArgs),

    /// Show collection settings
    GetSettings,

    /// Replace collection settings
    ReplaceSettings(ReplaceSettingsArgs),

    /// Show resource collection status
    Status,

    /// Trigger a manual reconcile
    Reconcile,
}

/// Filters for `list-configs`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Resource type, e.g. is.vpc
    #[arg(long)]
    pub config_type: Option<String>,

    #[arg(long)]
    pub service_name: Option<String>,

    #[arg(long)]
    pub resource_group_id: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub resource_crn: Option<String>,

    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,

    /// Cursor to resume from
    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub sub_account: Option<String>,

    #[arg(long)]
    pub access_tags: Option<String>,

    #[arg(long)]
    pub user_tags: Option<String>,

    #[arg(long)]
    pub service_tags: Option<String>,

    /// Fetch every page and print one combined list
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    /// Request options for these filters
    pub fn to_options(&self) -> ListConfigsOptions {
        ListConfigsOptions {
            config_type: self.config_type.clone(),
            service_name: self.service_name.clone(),
            resource_group_id: self.resource_group_id.clone(),
            location: self.location.clone(),
            resource_crn: self.resource_crn.clone(),
            limit: self.limit,
            start: self.start.clone(),
            sub_account: self.sub_account.clone(),
            access_tags: self.access_tags.clone(),
            user_tags: self.user_tags.clone(),
            service_tags: self.service_tags.clone(),
            ..ListConfigsOptions::default()
        }
    }
}

/// New settings for `replace-settings`
#[derive(Args, Debug, Default)]
pub struct ReplaceSettingsArgs {
    /// Trusted profile the service collects with
    #[arg(long)]
    pub trusted_profile_id: Option<String>,

    /// Enable or disable resource collection
    #[arg(long)]
    pub enabled: Option<bool>,

    /// Region to collect from (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Enterprise to add as an additional scope
    #[arg(long)]
    pub enterprise_id: Option<String>,

    /// Trusted profile template id for the enterprise scope
    #[arg(long, requires = "enterprise_id")]
    pub profile_template_id: Option<String>,

    /// Trusted profile created from the template
    #[arg(long, requires = "enterprise_id")]
    pub template_trusted_profile_id: Option<String>,
}

impl ReplaceSettingsArgs {
    /// Request options for these settings
    pub fn to_options(&self) -> ReplaceSettingsOptions {
        let additional_scope = self
            .enterprise_id
            .as_ref()
            .map(|enterprise_id| {
                let scope = AdditionalScope::enterprise(enterprise_id.clone());
                if self.profile_template_id.is_some() || self.template_trusted_profile_id.is_some() {
                    scope.with_profile_template(ProfileTemplate {
                        id: self.profile_template_id.clone(),
                        trusted_profile_id: self.template_trusted_profile_id.clone(),
                    })
                } else {
                    scope
                }
            })
            .into_iter()
            .collect();

        ReplaceSettingsOptions {
            resource_collection_enabled: self.enabled,
            trusted_profile_id: self.trusted_profile_id.clone(),
            regions: self.regions.clone(),
            additional_scope,
            ..ReplaceSettingsOptions::default()
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON (one document per line)
    Json,
    /// Indented JSON
    Pretty,
    /// YAML
    Yaml,
}
