use super::{check_goods_present, check_reference, BrokerRequest};
use crate::address::{FromAddress, ToAddress};
use crate::item::ShipmentItem;
use crate::parcel::Parcel;
use crate::party::{Dispatcher, Recipient};
use crate::pickup::PickupInfo;
use crate::response::ShipmentCreationResult;
use crate::sender::Sender;
use crate::transport::Operation;
use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};

/// Book a shipment with a known carrier product, without a prior quote.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentCreationRequest {
    /// Integration identity.
    pub sender: Sender,
    /// Carrier product to book.
    pub shipping_product_id: u64,
    /// Origin.
    pub from_address: FromAddress,
    /// Destination.
    pub to_address: ToAddress,
    /// Sending party.
    pub dispatcher: Option<Dispatcher>,
    /// Receiving party.
    pub recipient: Option<Recipient>,
    /// Merchant reference.
    pub reference: Option<String>,
    /// Declared value of the goods.
    pub value: Option<f64>,
    /// Cash on delivery amount.
    pub cod_amount: Option<f64>,
    /// Insure the shipment.
    pub insure: bool,
    /// Collection appointment.
    pub pickup: Option<PickupInfo>,
    /// Goods lines.
    pub items: Vec<ShipmentItem>,
    /// Packages.
    pub parcels: Vec<Parcel>,
}

impl ShipmentCreationRequest {
    /// Create a booking without goods yet.
    pub fn new(
        sender: Sender,
        shipping_product_id: u64,
        from_address: FromAddress,
        to_address: ToAddress,
    ) -> Self {
        Self {
            sender,
            shipping_product_id,
            from_address,
            to_address,
            dispatcher: None,
            recipient: None,
            reference: None,
            value: None,
            cod_amount: None,
            insure: false,
            pickup: None,
            items: Vec::new(),
            parcels: Vec::new(),
        }
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

    /// Set the merchant reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Declare the value of the goods.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Collect `amount` on delivery.
    pub fn with_cash_on_delivery(mut self, amount: f64) -> Self {
        self.cod_amount = Some(amount);
        self
    }

    /// Insure the shipment.
    pub fn insured(mut self) -> Self {
        self.insure = true;
        self
    }

    /// Set the collection appointment.
    pub fn with_pickup(mut self, pickup: PickupInfo) -> Self {
        self.pickup = Some(pickup);
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

impl Validate for ShipmentCreationRequest {
    fn violations(&self) -> Vec<RuleViolation> {
        let mut rules = Rules::new();
        rules.at_least("shipping_product_id", self.shipping_product_id, 1);
        check_reference(&mut rules, "reference", self.reference.as_deref());
        rules
            .opt_non_negative("value", self.value)
            .opt_non_negative("cod_amount", self.cod_amount);
        check_goods_present(&mut rules, &self.items, &self.parcels);
        rules
            .nested("sender", &self.sender)
            .nested("from_address", &self.from_address)
            .nested("to_address", &self.to_address)
            .nested_opt("dispatcher", self.dispatcher.as_ref())
            .nested_opt("recipient", self.recipient.as_ref())
            .nested_opt("pickup", self.pickup.as_ref())
            .nested_all("commodities", &self.items)
            .nested_all("parcels", &self.parcels)
            .finish()
    }
}

impl WireEntity for ShipmentCreationRequest {
    const ENTITY_NAME: &'static str = "ShipmentCreationRequest";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("create_shipment", |w| {
            w.fragment(&self.sender)
                .number("shipping_product_id", self.shipping_product_id)
                .fragment(&self.from_address)
                .fragment(&self.to_address)
                .opt_fragment(self.dispatcher.as_ref())
                .opt_fragment(self.recipient.as_ref())
                .opt_text("reference", self.reference.as_deref())
                .opt_number("value", self.value)
                .opt_money("cod_amount", self.cod_amount)
                .flag("insure", self.insure)
                .opt_fragment(self.pickup.as_ref())
                .list("commodities", &self.items)
                .list("parcels", &self.parcels);
        });
    }
}

impl BrokerRequest for ShipmentCreationRequest {
    type Payload = ShipmentCreationResult;

    fn operation(&self) -> Operation {
        Operation::CreateShipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::party::Party;
    use crate::wire::is_well_formed;
    use pretty_assertions::assert_eq;

    fn request() -> ShipmentCreationRequest {
        ShipmentCreationRequest::new(
            Sender::new(1, "key"),
            12,
            FromAddress::new(Address::new("60200").unwrap()),
            ToAddress::new(Address::new("11000").unwrap()),
        )
    }

    #[test]
    fn test_wire_format() {
        let shipment = request()
            .with_recipient(Recipient::new(Party::new().with_person_name("Petr")))
            .with_reference("Order 1001")
            .with_cash_on_delivery(499.0)
            .add_parcel(Parcel::new(3.2));
        let out = shipment.to_wire_format().unwrap();
        assert_eq!(
            out,
            "<create_shipment><sender><id>1</id><key>key</key><currency>CZK</currency>\
             <language>cs</language><encoding>UTF-8</encoding><api_version>2.0</api_version>\
             </sender><shipping_product_id>12</shipping_product_id><from_address>\
             <postal_code>60200</postal_code><country_code>CZ</country_code>\
             <residential>1</residential></from_address><to_address>\
             <postal_code>11000</postal_code><country_code>CZ</country_code>\
             <residental>1</residental></to_address><recipient><person_name>Petr</person_name>\
             </recipient><reference>Order 1001</reference><cod_amount>499.00</cod_amount>\
             <insure>0</insure><parcels><parcel><weight>3.2</weight></parcel></parcels>\
             </create_shipment>"
        );
        assert!(is_well_formed(&out));
    }

    #[test]
    fn test_rules() {
        let mut shipment = request().with_reference("Order #1").with_cash_on_delivery(-1.0);
        shipment.shipping_product_id = 0;
        let fields: Vec<_> = shipment.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["shipping_product_id", "reference", "cod_amount", "commodities"]
        );
    }
}
