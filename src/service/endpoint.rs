//! Service endpoint URLs

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Name used for external configuration lookups and analytics
pub const DEFAULT_SERVICE_NAME: &str = "configuration_aggregator";

/// Endpoint used when nothing else is configured
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.apprapp.cloud.ibm.com/apprapp/config_aggregator/v1/instances/provide-here-your-appconfig-instance-uuid";

const PARAMETERIZED_SERVICE_URL: &str =
    "https://{region}.apprapp.cloud.ibm.com/apprapp/config_aggregator/v1/instances/{instance_id}";

const DEFAULT_URL_VARIABLES: [(&str, &str); 2] = [
    ("region", "us-south"),
    ("instance_id", "provide-here-your-appconfig-instance-uuid"),
];

/// Fill the parameterized endpoint with `provided` variables
///
/// Known variables are `region` and `instance_id`; missing ones take their
/// defaults.
pub fn construct_service_url(provided: &HashMap<String, String>) -> Result<String> {
    if let Some(unknown) = provided
        .keys()
        .find(|k| !DEFAULT_URL_VARIABLES.iter().any(|(name, _)| *name == k.as_str()))
    {
        return Err(Error::config(format!(
            "'{unknown}' is an invalid variable name; valid names are: region, instance_id"
        )));
    }

    let url = DEFAULT_URL_VARIABLES
        .iter()
        .fold(PARAMETERIZED_SERVICE_URL.to_string(), |url, (name, default)| {
            let value = provided
                .get(*name)
                .map_or(*default, String::as_str);
            url.replace(&format!("{{{name}}}"), value)
        });
    Ok(url)
}

/// Regional endpoint lookup
///
/// The service publishes no regional endpoint table, so every region is
/// rejected; use [`construct_service_url`] instead.
pub fn service_url_for_region(region: &str) -> Result<String> {
    Err(Error::config(format!(
        "service URL for region '{region}' not found"
    )))
}
