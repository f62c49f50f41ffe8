//! Commercial goods lines carried in a shipment.

use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use once_cell::sync::Lazy;
use regex::Regex;
use shipbroker_codes::{CountryCode, CurrencyCode};

static TARIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6,10}$").expect("Failed to compile TARIC_REGEX"));

/// Unit of measure sent when none is set.
pub const DEFAULT_QUANTITY_UNITS: &str = "pcs";

/// One line of goods.
///
/// `name`, `quantity`, `unit_price` and `total_weight` are required. They are
/// plain fields so an incomplete line can exist and report what it lacks;
/// [`ShipmentItem::new`] fills all four at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentItem {
    /// Name of the goods.
    pub name: String,
    /// Number of units.
    pub quantity: u32,
    /// Price of one unit.
    pub unit_price: Option<f64>,
    /// Weight of all units together, in kilograms.
    pub total_weight: Option<f64>,
    /// Units actually shipped; all of them unless set.
    pub shipped: Option<u32>,
    /// TARIC customs tariff code.
    pub taric: Option<String>,
    /// Unit of measure; [`DEFAULT_QUANTITY_UNITS`] unless set.
    pub quantity_units: Option<String>,
    /// Customs description of the goods.
    pub description: Option<String>,
    /// Country the goods were made in.
    pub country_of_manufacture: Option<CountryCode>,
    /// Length in centimetres.
    pub length: Option<f64>,
    /// Width in centimetres.
    pub width: Option<f64>,
    /// Height in centimetres.
    pub height: Option<f64>,
    /// Currency of `unit_price`.
    pub currency: CurrencyCode,
    /// Whether the line travels in a parcel of its own.
    pub in_own_parcel: bool,
    /// Merchant's article number.
    pub article_number: Option<String>,
    /// Warehouse shelf position.
    pub shelf_position: Option<String>,
}

impl ShipmentItem {
    /// Create a line with all required fields.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: f64, total_weight: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price: Some(unit_price),
            total_weight: Some(total_weight),
            ..Self::default()
        }
    }

    /// Ship only part of the quantity.
    pub fn with_shipped(mut self, shipped: u32) -> Self {
        self.shipped = Some(shipped);
        self
    }

    /// Set customs data.
    pub fn with_customs(
        mut self,
        taric: impl Into<String>,
        description: impl Into<String>,
        country_of_manufacture: CountryCode,
    ) -> Self {
        self.taric = Some(taric.into());
        self.description = Some(description.into());
        self.country_of_manufacture = Some(country_of_manufacture);
        self
    }

    /// Set the unit of measure.
    pub fn with_quantity_units(mut self, units: impl Into<String>) -> Self {
        self.quantity_units = Some(units.into());
        self
    }

    /// Set the dimensions in centimetres.
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the price currency.
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// Pack this line separately.
    pub fn in_own_parcel(mut self) -> Self {
        self.in_own_parcel = true;
        self
    }

    /// Set warehouse references.
    pub fn with_warehouse_refs(
        mut self,
        article_number: impl Into<String>,
        shelf_position: impl Into<String>,
    ) -> Self {
        self.article_number = Some(article_number.into());
        self.shelf_position = Some(shelf_position.into());
        self
    }

    /// Units actually shipped.
    pub fn shipped_quantity(&self) -> u32 {
        self.shipped.unwrap_or(self.quantity)
    }

    /// `quantity * unit_price`, once the price is known.
    pub fn total_price(&self) -> Option<f64> {
        self.unit_price.map(|price| price * f64::from(self.quantity))
    }
}

impl Validate for ShipmentItem {
    fn violations(&self) -> Vec<RuleViolation> {
        let mut rules = Rules::new();
        rules
            .required("name", &self.name)
            .max_len("name", &self.name, 64)
            .markup_text("name", &self.name)
            .at_least("quantity", u64::from(self.quantity), 1);
        if let Some(shipped) = self.shipped {
            rules.check(
                shipped >= 1 && shipped <= self.quantity,
                "shipped",
                "must be between 1 and quantity",
            );
        }
        if let Some(taric) = self.taric.as_deref() {
            rules.check(
                TARIC_REGEX.is_match(taric),
                "taric",
                "must be 6 to 10 digits",
            );
        }
        rules
            .opt_max_len("quantity_units", self.quantity_units.as_deref(), 8)
            .opt_markup_text("quantity_units", self.quantity_units.as_deref())
            .opt_len_between("description", self.description.as_deref(), 15, 128)
            .opt_markup_text("description", self.description.as_deref());
        match self.total_weight {
            Some(weight) => rules.positive("weight", weight),
            None => rules.check(false, "weight", "is required"),
        };
        rules
            .opt_positive("length", self.length)
            .opt_positive("width", self.width)
            .opt_positive("height", self.height);
        match self.unit_price {
            Some(price) => rules.non_negative("unit_price", price),
            None => rules.check(false, "unit_price", "is required"),
        };
        rules
            .opt_max_len("article_number", self.article_number.as_deref(), 64)
            .opt_markup_text("article_number", self.article_number.as_deref())
            .opt_max_len("shelf_position", self.shelf_position.as_deref(), 64)
            .opt_markup_text("shelf_position", self.shelf_position.as_deref())
            .finish()
    }
}

impl WireEntity for ShipmentItem {
    const ENTITY_NAME: &'static str = "ShipmentItem";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("commodity", |w| {
            w.text("name", &self.name)
                .number("quantity", self.quantity)
                .number("shipped", self.shipped_quantity())
                .opt_text("taric", self.taric.as_deref())
                .text(
                    "quantity_units",
                    self.quantity_units
                        .as_deref()
                        .unwrap_or(DEFAULT_QUANTITY_UNITS),
                )
                .opt_text("description", self.description.as_deref())
                .opt_display("country_of_manufacture", self.country_of_manufacture.as_ref())
                .opt_number("weight", self.total_weight)
                .opt_number("length", self.length)
                .opt_number("width", self.width)
                .opt_number("height", self.height)
                .opt_number("unit_price", self.unit_price)
                .display("currency", self.currency)
                .flag("in_own_parcel", self.in_own_parcel)
                .opt_text("article_number", self.article_number.as_deref())
                .opt_text("shelf_position", self.shelf_position.as_deref());
        });
    }
}
