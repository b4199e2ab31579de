//! Scrape controllable devices out of the control panel markup
//!
//! Every control on the panel is an `<a>` whose class mentions "id" and that
//! carries the display name in `data-title` and the control identifier in
//! `data-name`. A nested `name="<digits>"` attribute tells the widget type.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use super::DeviceDirectory;

/// Widget type codes that are switched with relay packets. What the codes
/// mean on the hub is unknown; these two are the ones that respond.
pub const ALLOWED_WIDGET_TYPE_CODES: [&str; 2] = ["0", "2"];

fn widget_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\sname="(\d+)""#).expect("static pattern"))
}

/// Parse `html` and extract the device directory from it
pub fn extract_from_str(html: &str) -> DeviceDirectory {
    let document = Html::parse_document(html);
    extract(&document)
}

/// Build the device directory from a parsed control panel
pub fn extract(document: &Html) -> DeviceDirectory {
    let mut directory = DeviceDirectory::new();

    info!("loading relays from control panel");

    let anchors = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(e) => {
            warn!(?e, "anchor selector rejected");
            return directory;
        }
    };

    for element in document.select(&anchors) {
        let Some((title, id)) = qualify(&element) else {
            continue;
        };

        if let Err(e) = directory.insert(title, id) {
            debug!(%e, "skipping duplicate control");
        }
    }

    info!(devices = directory.len(), "finished loading relays");
    directory
}

/// Return `(data-title, id)` when the anchor is a switchable control
fn qualify(element: &ElementRef<'_>) -> Option<(String, i16)> {
    let attrs = element.value();

    let class = attrs.attr("class")?;
    if !class.to_lowercase().contains("id") {
        return None;
    }

    let title = attrs.attr("data-title").filter(|t| !t.is_empty())?;
    let name = attrs.attr("data-name").filter(|n| !n.is_empty())?;

    let markup = element.html();
    let widget_type = widget_type_pattern()
        .captures(&markup)
        .and_then(|caps| caps.get(1))?
        .as_str();
    if !ALLOWED_WIDGET_TYPE_CODES.contains(&widget_type) {
        return None;
    }

    match name.trim().parse::<i16>() {
        Ok(id) => Some((title.to_string(), id)),
        Err(e) => {
            warn!(title, name, %e, "control identifier is not a 16-bit integer");
            None
        }
    }
}
