use super::{check_goods_present, BrokerRequest};
use crate::address::{FromAddress, ToAddress};
use crate::item::ShipmentItem;
use crate::parcel::Parcel;
use crate::response::QuoteResult;
use crate::sender::Sender;
use crate::transport::Operation;
use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};
use shipbroker_codes::SortOrder;

/// Ask the broker to price a shipment across its carriers.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    /// Integration identity.
    pub sender: Sender,
    /// Origin; the sender's registered address unless set.
    pub from_address: Option<FromAddress>,
    /// Destination.
    pub to_address: ToAddress,
    /// Declared value of the goods.
    pub value: Option<f64>,
    /// Price insurance into every product.
    pub insure: bool,
    /// Ordering of the returned products.
    pub sort: SortOrder,
    /// Expand pickup point agents inside each product.
    pub agents_in: bool,
    /// Only products delivered to the door.
    pub no_agents: bool,
    /// Restrict the quote to these products.
    pub shipping_product_ids: Vec<u64>,
    /// Goods lines.
    pub items: Vec<ShipmentItem>,
    /// Packages.
    pub parcels: Vec<Parcel>,
}

impl QuoteRequest {
    /// Create a quote request without goods yet.
    pub fn new(sender: Sender, to_address: ToAddress) -> Self {
        Self {
            sender,
            from_address: None,
            to_address,
            value: None,
            insure: false,
            sort: SortOrder::default(),
            agents_in: false,
            no_agents: false,
            shipping_product_ids: Vec::new(),
            items: Vec::new(),
            parcels: Vec::new(),
        }
    }

    /// Set the origin.
    pub fn with_from_address(mut self, from_address: FromAddress) -> Self {
        self.from_address = Some(from_address);
        self
    }

    /// Declare the value of the goods.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Include insurance.
    pub fn insured(mut self) -> Self {
        self.insure = true;
        self
    }

    /// Set the ordering.
    pub fn sorted_by(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Expand agents inside products.
    pub fn with_agents_in(mut self) -> Self {
        self.agents_in = true;
        self
    }

    /// Exclude pickup point products.
    pub fn without_agents(mut self) -> Self {
        self.no_agents = true;
        self
    }

    /// Restrict to the given products.
    pub fn only_products(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.shipping_product_ids = ids.into_iter().collect();
        self
    }

    /// Add a goods line.
    pub fn add_item(mut self, item: ShipmentItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add a package.
    pub fn add_parcel(mut self, parcel: Parcel) -> Self {
        self.parcels.push(parcel);
        self
    }
}

impl Validate for QuoteRequest {
    fn violations(&self) -> Vec<RuleViolation> {
        let mut rules = Rules::new();
        rules.opt_non_negative("value", self.value);
        for id in &self.shipping_product_ids {
            rules.at_least("shipping_product_ids", *id, 1);
        }
        check_goods_present(&mut rules, &self.items, &self.parcels);
        rules
            .nested("sender", &self.sender)
            .nested_opt("from_address", self.from_address.as_ref())
            .nested("to_address", &self.to_address)
            .nested_all("commodities", &self.items)
            .nested_all("parcels", &self.parcels)
            .finish()
    }
}

impl WireEntity for QuoteRequest {
    const ENTITY_NAME: &'static str = "QuoteRequest";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("quote", |w| {
            w.fragment(&self.sender)
                .opt_fragment(self.from_address.as_ref())
                .fragment(&self.to_address)
                .opt_number("value", self.value)
                .flag("insure", self.insure)
                .display("sort", self.sort)
                .flag("agents_in", self.agents_in)
                .flag("no_agents", self.no_agents);
            if !self.shipping_product_ids.is_empty() {
                w.element("shipping_product_ids", |ids| {
                    for id in &self.shipping_product_ids {
                        ids.number("shipping_product_id", *id);
                    }
                });
            }
            w.list("commodities", &self.items)
                .list("parcels", &self.parcels);
        });
    }
}

impl BrokerRequest for QuoteRequest {
    type Payload = QuoteResult;

    fn operation(&self) -> Operation {
        Operation::Quote
    }
}
