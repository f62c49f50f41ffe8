//! Origin and destination addresses.
//!
//! [`Address`] carries the fields and rules both roles share. The role types
//! [`FromAddress`] and [`ToAddress`] wrap it, add their own fields and wrap
//! the shared fragment in their own root tag.

use crate::error::{Error, Result};
use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use shipbroker_codes::{CountryCode, LanguageCode};

const POSTAL_CODE_MAX: usize = 16;
const STREET_MAX: usize = 35;
const CITY_MAX: usize = 32;

/// Fields shared by every address role.
///
/// The postal code is fixed at construction; every other field can be
/// changed through the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    postal_code: String,
    /// First street line.
    pub street: Option<String>,
    /// Second street line.
    pub street2: Option<String>,
    /// Third street line.
    pub street3: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Private rather than business address.
    pub is_residential: bool,
    /// Country; domestic unless set.
    pub country_code: CountryCode,
    /// Delivery instructions for the courier.
    pub instructions: Option<String>,
    /// Door or gate entry code.
    pub entry_code: Option<String>,
}

impl Address {
    /// Create a domestic address, rejecting a blank or overlong postal code.
    pub fn new(postal_code: impl Into<String>) -> Result<Self> {
        Self::new_in(postal_code, CountryCode::default())
    }

    /// Create an address in `country_code`, rejecting a blank or overlong
    /// postal code.
    pub fn new_in(postal_code: impl Into<String>, country_code: CountryCode) -> Result<Self> {
        let postal_code = postal_code.into().trim().to_string();
        if postal_code.is_empty() {
            return Err(Error::invalid_field("postal_code", "is required"));
        }
        if postal_code.chars().count() > POSTAL_CODE_MAX {
            return Err(Error::invalid_field(
                "postal_code",
                format!("must be at most {} characters long", POSTAL_CODE_MAX),
            ));
        }
        Ok(Self {
            postal_code,
            street: None,
            street2: None,
            street3: None,
            city: None,
            is_residential: true,
            country_code,
            instructions: None,
            entry_code: None,
        })
    }

    /// Postal code given at construction.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Set the first street line.
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Set all three street lines.
    pub fn with_street_lines(
        mut self,
        street: impl Into<String>,
        street2: impl Into<String>,
        street3: impl Into<String>,
    ) -> Self {
        self.street = Some(street.into());
        self.street2 = Some(street2.into());
        self.street3 = Some(street3.into());
        self
    }

    /// Set the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country_code: CountryCode) -> Self {
        self.country_code = country_code;
        self
    }

    /// Mark as a business address.
    pub fn business(mut self) -> Self {
        self.is_residential = false;
        self
    }

    /// Set courier instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the entry code.
    pub fn with_entry_code(mut self, entry_code: impl Into<String>) -> Self {
        self.entry_code = Some(entry_code.into());
        self
    }

    fn write_fields(&self, writer: &mut WireWriter, residential_tag: &str) {
        writer
            .text("postal_code", &self.postal_code)
            .opt_text("street", self.street.as_deref())
            .opt_text("street2", self.street2.as_deref())
            .opt_text("street3", self.street3.as_deref())
            .opt_text("city", self.city.as_deref())
            .display("country_code", &self.country_code)
            .flag(residential_tag, self.is_residential)
            .opt_text("instructions", self.instructions.as_deref())
            .opt_text("entry_code", self.entry_code.as_deref());
    }
}

impl Validate for Address {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .required("postal_code", &self.postal_code)
            .max_len("postal_code", &self.postal_code, POSTAL_CODE_MAX)
            .markup_text("postal_code", &self.postal_code)
            .opt_max_len("street", self.street.as_deref(), STREET_MAX)
            .opt_markup_text("street", self.street.as_deref())
            .opt_max_len("street2", self.street2.as_deref(), STREET_MAX)
            .opt_markup_text("street2", self.street2.as_deref())
            .opt_max_len("street3", self.street3.as_deref(), STREET_MAX)
            .opt_markup_text("street3", self.street3.as_deref())
            .opt_max_len("city", self.city.as_deref(), CITY_MAX)
            .opt_markup_text("city", self.city.as_deref())
            .opt_markup_text("instructions", self.instructions.as_deref())
            .opt_markup_text("entry_code", self.entry_code.as_deref())
            .finish()
    }
}

/// Where the shipment is collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromAddress {
    address: Address,
}

impl FromAddress {
    /// Use `address` as the origin.
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Shared address fields.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Replace the shared address fields.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }
}

impl From<Address> for FromAddress {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}

impl Validate for FromAddress {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new().extend(self.address.violations()).finish()
    }
}

impl WireEntity for FromAddress {
    const ENTITY_NAME: &'static str = "FromAddress";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("from_address", |w| {
            self.address.write_fields(w, "residential");
        });
    }
}

/// Where the shipment is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToAddress {
    address: Address,
    /// Language for recipient notifications.
    pub language: Option<LanguageCode>,
}

impl ToAddress {
    /// Use `address` as the destination.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            language: None,
        }
    }

    /// Set the notification language.
    pub fn with_language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }

    /// Shared address fields.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Replace the shared address fields.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }
}

impl From<Address> for ToAddress {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}

impl Validate for ToAddress {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new().extend(self.address.violations()).finish()
    }
}

impl WireEntity for ToAddress {
    const ENTITY_NAME: &'static str = "ToAddress";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("to_address", |w| {
            // The broker spells the destination flag this way.
            self.address.write_fields(w, "residental");
            w.opt_display("language", self.language.as_ref());
        });
    }
}
