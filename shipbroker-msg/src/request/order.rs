use super::{check_reference, BrokerRequest};
use crate::address::{FromAddress, ToAddress};
use crate::error::{Error, Result};
use crate::item::ShipmentItem;
use crate::parcel::Parcel;
use crate::party::{Dispatcher, Recipient};
use crate::pickup::PickupInfo;
use crate::response::OrderResult;
use crate::sender::Sender;
use crate::transport::Operation;
use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use shipbroker_codes::ExportReason;

/// Fields shared by both kinds of order.
///
/// An `Order` is never sent on its own; wrap it in a [`DirectOrder`] or a
/// [`QuoteOrder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Integration identity.
    pub sender: Sender,
    /// Carrier product to book.
    pub shipping_product_id: u64,
    /// Goods lines.
    pub items: Vec<ShipmentItem>,
    /// Declared value of the goods.
    pub value: Option<f64>,
    /// URL the broker calls when the order changes state.
    pub callback_url: Option<String>,
    /// Insure with the product's default coverage.
    pub insure_default: bool,
    /// Pickup point agent to deliver to.
    pub agent_id: Option<u64>,
    /// Merchant reference.
    pub reference: Option<String>,
    /// Reason for export outside the customs union.
    pub export_reason: ExportReason,
    /// Deliver to the door, never to an agent.
    pub no_agents: bool,
    /// Sending party.
    pub dispatcher: Option<Dispatcher>,
    /// Receiving party.
    pub recipient: Option<Recipient>,
    /// Collection appointment.
    pub pickup: Option<PickupInfo>,
    /// Address the broker sends order notifications to.
    pub sender_email: Option<String>,
}

impl Order {
    /// Create the shared part of an order.
    pub fn new(sender: Sender, shipping_product_id: u64) -> Self {
        Self {
            sender,
            shipping_product_id,
            items: Vec::new(),
            value: None,
            callback_url: None,
            insure_default: false,
            agent_id: None,
            reference: None,
            export_reason: ExportReason::default(),
            no_agents: false,
            dispatcher: None,
            recipient: None,
            pickup: None,
            sender_email: None,
        }
    }

    /// Add a goods line.
    pub fn add_item(mut self, item: ShipmentItem) -> Self {
        self.items.push(item);
        self
    }

    /// Declare the value of the goods.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the state-change callback.
    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Insure with default coverage.
    pub fn insured(mut self) -> Self {
        self.insure_default = true;
        self
    }

    /// Deliver to a pickup point agent.
    pub fn with_agent(mut self, agent_id: u64) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Set the merchant reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the export reason.
    pub fn with_export_reason(mut self, reason: ExportReason) -> Self {
        self.export_reason = reason;
        self
    }

    /// Refuse pickup point delivery.
    pub fn without_agents(mut self) -> Self {
        self.no_agents = true;
        self
    }

    /// Set the sending party.
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Set the receiving party.
    pub fn with_recipient(mut self, recipient: Recipient) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Set the collection appointment.
    pub fn with_pickup(mut self, pickup: PickupInfo) -> Self {
        self.pickup = Some(pickup);
        self
    }

    /// Set the notification address.
    pub fn with_sender_email(mut self, email: impl Into<String>) -> Self {
        self.sender_email = Some(email.into());
        self
    }

    fn write_fields(&self, writer: &mut WireWriter) {
        writer
            .opt_number("value", self.value)
            .fragment(&self.sender)
            .flag("insure_default", self.insure_default)
            .number("shipping_product_id", self.shipping_product_id)
            .display("export_reason", self.export_reason)
            .flag("no_agents", self.no_agents)
            .opt_text("callback_url", self.callback_url.as_deref())
            .opt_number("agent_id", self.agent_id)
            .opt_text("reference", self.reference.as_deref())
            .opt_text("sender_email", self.sender_email.as_deref())
            .list("commodities", &self.items)
            .opt_fragment(self.dispatcher.as_ref())
            .opt_fragment(self.recipient.as_ref())
            .opt_fragment(self.pickup.as_ref());
    }
}

impl Validate for Order {
    fn violations(&self) -> Vec<RuleViolation> {
        let mut rules = Rules::new();
        rules
            .opt_non_negative("value", self.value)
            .at_least("shipping_product_id", self.shipping_product_id, 1)
            .opt_url("callback_url", self.callback_url.as_deref())
            .opt_markup_text("callback_url", self.callback_url.as_deref());
        if let Some(agent_id) = self.agent_id {
            rules.at_least("agent_id", agent_id, 1);
        }
        check_reference(&mut rules, "reference", self.reference.as_deref());
        rules
            .opt_email("sender_email", self.sender_email.as_deref())
            .opt_markup_text("sender_email", self.sender_email.as_deref())
            .nested("sender", &self.sender)
            .nested_all("commodities", &self.items)
            .nested_opt("dispatcher", self.dispatcher.as_ref())
            .nested_opt("recipient", self.recipient.as_ref())
            .nested_opt("pickup", self.pickup.as_ref())
            .finish()
    }
}

/// An order that carries its own addresses and packages.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectOrder {
    /// Shared order fields.
    pub order: Order,
    /// Origin; the sender's registered address unless set.
    pub from_address: Option<FromAddress>,
    to_address: ToAddress,
    /// Packages.
    pub parcels: Vec<Parcel>,
}

fn ensure_valid_destination(to_address: &ToAddress) -> Result<()> {
    let violations = to_address.violations();
    if violations.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
    Err(Error::invalid_field("to_address", details.join("; ")))
}

impl DirectOrder {
    /// Create a direct order, rejecting an invalid destination.
    pub fn new(order: Order, to_address: ToAddress) -> Result<Self> {
        ensure_valid_destination(&to_address)?;
        Ok(Self {
            order,
            from_address: None,
            to_address,
            parcels: Vec::new(),
        })
    }

    /// Destination.
    pub fn to_address(&self) -> &ToAddress {
        &self.to_address
    }

    /// Swap the destination, rejecting an invalid one.
    pub fn replace_to_address(mut self, to_address: ToAddress) -> Result<Self> {
        ensure_valid_destination(&to_address)?;
        self.to_address = to_address;
        Ok(self)
    }

    /// Set the origin.
    pub fn with_from_address(mut self, from_address: FromAddress) -> Self {
        self.from_address = Some(from_address);
        self
    }

    /// Add a package.
    pub fn add_parcel(mut self, parcel: Parcel) -> Self {
        self.parcels.push(parcel);
        self
    }
}

impl Validate for DirectOrder {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .extend(self.order.violations())
            .nested_opt("from_address", self.from_address.as_ref())
            .nested("to_address", &self.to_address)
            .nested_all("parcels", &self.parcels)
            .finish()
    }
}

impl WireEntity for DirectOrder {
    const ENTITY_NAME: &'static str = "DirectOrder";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("order", |w| {
            self.order.write_fields(w);
            w.opt_fragment(self.from_address.as_ref())
                .fragment(&self.to_address)
                .list("parcels", &self.parcels);
        });
    }
}

impl BrokerRequest for DirectOrder {
    type Payload = OrderResult;

    fn operation(&self) -> Operation {
        Operation::Order
    }
}

/// An order placed against a quote the broker already issued.
///
/// Addresses and packages are taken from the quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteOrder {
    /// Shared order fields.
    pub order: Order,
    /// Quote being ordered.
    pub quote_id: u64,
}

impl QuoteOrder {
    /// Order the product from quote `quote_id`.
    pub fn new(order: Order, quote_id: u64) -> Self {
        Self { order, quote_id }
    }
}

impl Validate for QuoteOrder {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .at_least("quote_id", self.quote_id, 1)
            .extend(self.order.violations())
            .finish()
    }
}

impl WireEntity for QuoteOrder {
    const ENTITY_NAME: &'static str = "QuoteOrder";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("quote_order", |w| {
            self.order.write_fields(w);
            w.number("quote_id", self.quote_id);
        });
    }
}

impl BrokerRequest for QuoteOrder {
    type Payload = OrderResult;

    fn operation(&self) -> Operation {
        Operation::Order
    }
}
