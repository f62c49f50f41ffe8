//! Contact parties on either end of a shipment.
//!
//! [`Party`] holds the name, contact and tax fields shared by both roles.
//! [`Dispatcher`] adds customs registration details, [`Recipient`] adds a
//! mobile number and a free-text message.

use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};

/// Name, contact and tax fields shared by both party roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Party {
    /// Company name.
    pub company_name: Option<String>,
    /// Contact person.
    pub person_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// EU Economic Operators Registration and Identification number.
    pub eori: Option<String>,
    /// Tax identification number.
    pub tin: Option<String>,
}

impl Party {
    /// Create an empty party.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the company name.
    pub fn with_company_name(mut self, value: impl Into<String>) -> Self {
        self.company_name = Some(value.into());
        self
    }

    /// Set the contact person.
    pub fn with_person_name(mut self, value: impl Into<String>) -> Self {
        self.person_name = Some(value.into());
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the EORI number.
    pub fn with_eori(mut self, value: impl Into<String>) -> Self {
        self.eori = Some(value.into());
        self
    }

    /// Set the tax identification number.
    pub fn with_tin(mut self, value: impl Into<String>) -> Self {
        self.tin = Some(value.into());
        self
    }

    fn write_fields(&self, writer: &mut WireWriter) {
        writer
            .opt_text("company_name", self.company_name.as_deref())
            .opt_text("person_name", self.person_name.as_deref())
            .opt_text("phone", self.phone.as_deref())
            .opt_text("email", self.email.as_deref())
            .opt_text("eori", self.eori.as_deref())
            .opt_text("tin", self.tin.as_deref());
    }
}

impl Validate for Party {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .opt_max_len("company_name", self.company_name.as_deref(), 32)
            .opt_markup_text("company_name", self.company_name.as_deref())
            .opt_max_len("person_name", self.person_name.as_deref(), 32)
            .opt_markup_text("person_name", self.person_name.as_deref())
            .opt_max_len("phone", self.phone.as_deref(), 32)
            .opt_markup_text("phone", self.phone.as_deref())
            .opt_max_len("email", self.email.as_deref(), 64)
            .opt_email("email", self.email.as_deref())
            .opt_markup_text("email", self.email.as_deref())
            .opt_max_len("eori", self.eori.as_deref(), 32)
            .opt_markup_text("eori", self.eori.as_deref())
            .opt_max_len("tin", self.tin.as_deref(), 18)
            .opt_markup_text("tin", self.tin.as_deref())
            .finish()
    }
}

/// The sending side, with customs registration details for exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatcher {
    party: Party,
    /// Customs registration number.
    pub customs_registration_number: Option<String>,
    /// Customs office the registration belongs to.
    pub customs_office: Option<String>,
    /// Short code of that customs office.
    pub customs_office_code: Option<String>,
}

impl Dispatcher {
    /// Wrap shared party fields.
    pub fn new(party: Party) -> Self {
        Self {
            party,
            ..Self::default()
        }
    }

    /// Set the customs registration.
    pub fn with_customs_registration(
        mut self,
        number: impl Into<String>,
        office: impl Into<String>,
        office_code: impl Into<String>,
    ) -> Self {
        self.customs_registration_number = Some(number.into());
        self.customs_office = Some(office.into());
        self.customs_office_code = Some(office_code.into());
        self
    }

    /// Shared party fields.
    pub fn party(&self) -> &Party {
        &self.party
    }
}

impl Validate for Dispatcher {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .opt_max_len(
                "customs_registration_number",
                self.customs_registration_number.as_deref(),
                32,
            )
            .opt_markup_text(
                "customs_registration_number",
                self.customs_registration_number.as_deref(),
            )
            .opt_max_len("customs_office", self.customs_office.as_deref(), 32)
            .opt_markup_text("customs_office", self.customs_office.as_deref())
            .opt_max_len("customs_office_code", self.customs_office_code.as_deref(), 10)
            .opt_markup_text("customs_office_code", self.customs_office_code.as_deref())
            .extend(self.party.violations())
            .finish()
    }
}

impl WireEntity for Dispatcher {
    const ENTITY_NAME: &'static str = "Dispatcher";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("dispatcher", |w| {
            self.party.write_fields(w);
            w.opt_text(
                "customs_registration_number",
                self.customs_registration_number.as_deref(),
            )
            .opt_text("customs_office", self.customs_office.as_deref())
            .opt_text("customs_office_code", self.customs_office_code.as_deref());
        });
    }
}

/// The receiving side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipient {
    party: Party,
    /// Mobile number for delivery notifications.
    pub mobile: Option<String>,
    /// Message passed on to the recipient.
    pub message: Option<String>,
}

impl Recipient {
    /// Wrap shared party fields.
    pub fn new(party: Party) -> Self {
        Self {
            party,
            ..Self::default()
        }
    }

    /// Set the mobile number.
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Set the message for the recipient.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Shared party fields.
    pub fn party(&self) -> &Party {
        &self.party
    }
}

impl Validate for Recipient {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .opt_max_len("mobile", self.mobile.as_deref(), 32)
            .opt_markup_text("mobile", self.mobile.as_deref())
            .opt_markup_text("message", self.message.as_deref())
            .extend(self.party.violations())
            .finish()
    }
}

impl WireEntity for Recipient {
    const ENTITY_NAME: &'static str = "Recipient";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("recipient", |w| {
            self.party.write_fields(w);
            w.opt_text("mobile", self.mobile.as_deref())
                .opt_text("message", self.message.as_deref());
        });
    }
}
