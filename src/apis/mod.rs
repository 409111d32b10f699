pub mod mebelshara;
pub mod tui;

use crate::config::Config;
use crate::constants::{self, MEBELSHARA_API, TUI_API};
use crate::error::{Result, ScraperError};
use crate::types::StoreApi;

pub fn create_api(api_name: &str, config: &Config) -> Option<Box<dyn StoreApi>> {
    match api_name {
        MEBELSHARA_API => Some(Box::new(mebelshara::MebelsharaCrawler::new(
            config.sources.mebelshara.clone(),
            &config.http,
        ))),
        TUI_API => Some(Box::new(tui::TuiCrawler::new(config.sources.tui.clone()))),
        _ => None,
    }
}

/// Build the requested sources in registry order, or all of them when
/// `api_names` is `None`. The order callers list names in does not matter.
pub fn create_apis(api_names: Option<&[String]>, config: &Config) -> Result<Vec<Box<dyn StoreApi>>> {
    if let Some(names) = api_names {
        if let Some(unknown) = names
            .iter()
            .find(|n| create_api(n, config).is_none())
        {
            return Err(ScraperError::UnknownSource(unknown.clone()));
        }
    }

    Ok(constants::get_supported_apis()
        .into_iter()
        .filter(|name| api_names.map_or(true, |names| names.iter().any(|n| n.as_str() == *name)))
        .filter_map(|name| create_api(name, config))
        .collect())
}
