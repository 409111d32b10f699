use crate::config::{HttpConfig, SourceConfig};
use crate::constants::MEBELSHARA_API;
use crate::error::{Result, ScraperError};
use crate::types::{NormalizedRecord, SourceRequest, StoreApi};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument};

/// Furniture store contacts page. Every `div.city-item` holds one shop whose
/// details live in `data-shop-*` attributes.
pub struct MebelsharaCrawler {
    source: SourceConfig,
    user_agent: String,
    accept: String,
}

impl MebelsharaCrawler {
    pub fn new(source: SourceConfig, http: &HttpConfig) -> Self {
        Self {
            source,
            user_agent: http.user_agent.clone(),
            accept: http.accept.clone(),
        }
    }
}

struct Selectors {
    item: Selector,
    city: Selector,
    shop: Selector,
    shop_name: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            item: selector("div.city-item")?,
            city: selector("h4.js-city-name")?,
            shop: selector("div.shop-list-item")?,
            shop_name: selector("div.shop-name")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::Parse(format!("Invalid selector '{css}': {e}")))
}

fn first<'a>(item: ElementRef<'a>, selector: &Selector, what: &str) -> Result<ElementRef<'a>> {
    item.select(selector)
        .next()
        .ok_or_else(|| ScraperError::MissingField(format!("{what} not found")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ScraperError::MissingField(format!("{name} not found")))
}

fn coordinate(element: ElementRef<'_>, name: &str) -> Result<f64> {
    let raw = attr(element, name)?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ScraperError::Parse(format!("Failed to parse {name} '{raw}': {e}")))?;
    // "NaN" and "inf" parse fine but would be written out as null
    if !value.is_finite() {
        return Err(ScraperError::Parse(format!("{name} is not a finite number: '{raw}'")));
    }
    Ok(value)
}

fn parse_item(item: ElementRef<'_>, selectors: &Selectors) -> Result<NormalizedRecord> {
    let city = text_of(first(item, &selectors.city, "h4.js-city-name")?);
    let shop = first(item, &selectors.shop, "div.shop-list-item")?;
    let name = text_of(first(item, &selectors.shop_name, "div.shop-name")?);

    let address = format!("{}, {}", city, attr(shop, "data-shop-address")?);
    let coordinates = (
        coordinate(shop, "data-shop-latitude")?,
        coordinate(shop, "data-shop-longitude")?,
    );

    // "+7 (495) 123-45-67" -> "+7 495 123-45-67"
    let phone = attr(shop, "data-shop-phone")?.replace(['(', ')'], "");

    // Both modes are already human readable, e.g. "пн-пт: 10:00-21:00"
    let working_hours = format!(
        "{} {}",
        attr(shop, "data-shop-mode1")?,
        attr(shop, "data-shop-mode2")?
    );

    Ok(NormalizedRecord {
        address,
        coordinates,
        name,
        phones: vec![phone],
        working_hours: vec![working_hours],
    })
}

impl StoreApi for MebelsharaCrawler {
    fn api_name(&self) -> &'static str {
        MEBELSHARA_API
    }

    fn request(&self) -> SourceRequest {
        SourceRequest {
            url: self.source.url.clone(),
            query: self.source.query.clone(),
            headers: vec![
                ("User-Agent".to_string(), self.user_agent.clone()),
                ("accept".to_string(), self.accept.clone()),
            ],
        }
    }

    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    fn normalize(&self, payload: &[u8]) -> Result<Vec<NormalizedRecord>> {
        let body = String::from_utf8_lossy(payload);
        let document = Html::parse_document(&body);
        let selectors = Selectors::new()?;

        let items: Vec<_> = document.select(&selectors.item).collect();
        debug!("Found {} elements with selector 'div.city-item'", items.len());

        let records = items
            .into_iter()
            .map(|item| parse_item(item, &selectors))
            .collect::<Result<Vec<_>>>()?;

        info!("Normalized {} stores from {}", records.len(), MEBELSHARA_API);
        Ok(records)
    }
}
