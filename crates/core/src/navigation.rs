//! Navigation parameters.
//!
//! A view is opened with a location such as
//! `/cart?name=Shirt&price=500&description=Cotton&image=%2Fshirt.png`. The
//! query names a product to add; once it has been reconciled into the list
//! the caller replaces the location with its parameter-free equivalent so a
//! refresh does not add the product again.

use tracing::{debug, warn};
use url::{Url, form_urlencoded};

use crate::types::{Price, ProductCandidate};

/// Query parameter names carrying an incoming product.
pub mod params {
    pub const NAME: &str = "name";
    pub const PRICE: &str = "price";
    pub const DESCRIPTION: &str = "description";
    pub const IMAGE: &str = "image";
}

/// Base used to resolve relative locations like `/cart?…`.
const RELATIVE_BASE: &str = "http://localhost/";

#[derive(Default)]
struct RawCandidate {
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
    image: Option<String>,
}

impl ProductCandidate {
    /// Build a candidate from a raw query string (with or without a leading `?`).
    ///
    /// Returns `None` unless `name`, `price`, `description` and `image` are all
    /// present and non-empty and `price` is a number. When a key repeats, its
    /// first value wins.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut raw = RawCandidate::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                params::NAME => &mut raw.name,
                params::PRICE => &mut raw.price,
                params::DESCRIPTION => &mut raw.description,
                params::IMAGE => &mut raw.image,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }

        let (Some(name), Some(price), Some(description), Some(image)) =
            (raw.name, raw.price, raw.description, raw.image)
        else {
            debug!("Incomplete product parameters, nothing to add");
            return None;
        };

        let price = match Price::parse(&price) {
            Ok(price) => price,
            Err(e) => {
                warn!(name = %name, error = %e, "Ignoring incoming product with invalid price");
                return None;
            }
        };

        Some(Self {
            name,
            price,
            description,
            image,
        })
    }

    /// Build a candidate from the query of a location.
    ///
    /// Accepts absolute URLs and relative paths such as `/wishlist?name=…`.
    #[must_use]
    pub fn from_location(location: &str) -> Option<Self> {
        let url = parse_location(location)?;
        url.query().and_then(Self::from_query)
    }
}

/// The location with its query and fragment removed.
///
/// Relative inputs stay relative: `/cart?name=x` becomes `/cart`.
#[must_use]
pub fn strip_query(location: &str) -> String {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    location.get(..end).unwrap_or(location).to_owned()
}

fn parse_location(location: &str) -> Option<Url> {
    Url::parse(location)
        .or_else(|_| {
            Url::parse(RELATIVE_BASE).and_then(|base| base.join(location))
        })
        .map_err(|e| warn!(location, error = %e, "Unparseable location"))
        .ok()
}

/// Result of loading a list and merging in an incoming product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<T> {
    /// The list after reconciliation, in insertion order.
    pub items: Vec<T>,
    /// Whether navigation parameters named a complete product.
    pub consumed_query: bool,
}

impl<T> Reconciled<T> {
    /// Location the navigation layer should switch to, if any.
    ///
    /// `Some` only when the parameters were consumed, so a reload of the
    /// returned location cannot add the product a second time.
    #[must_use]
    pub fn replace_location(&self, current: &str) -> Option<String> {
        self.consumed_query.then(|| strip_query(current))
    }
}
