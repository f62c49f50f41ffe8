//! End-to-end rendering of request documents.

use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use shipbroker_msg::codes::{CountryCode, CurrencyCode, ExportReason, LanguageCode};
use shipbroker_msg::wire::is_well_formed;
use shipbroker_msg::{
    Address, BrokerRequest, DirectOrder, Dispatcher, Error, FromAddress, Operation, Order,
    Parcel, Party, PickupInfo, QuoteOrder, QuoteRequest, ReQuoteRequest, Recipient,
    ReferredSender, Sender, ShipmentCreationRequest, ShipmentItem, ToAddress, Validate,
    WireEntity,
};

fn sender() -> Sender {
    Sender::new(1001, "k3y")
        .with_system("Shop", "2.4", "0.9")
        .referring(ReferredSender::new(55, "ref-key"))
}

fn origin() -> FromAddress {
    FromAddress::new(
        Address::new("60200")
            .unwrap()
            .with_street("Hlavní 12")
            .with_city("Brno")
            .business(),
    )
}

fn destination() -> ToAddress {
    ToAddress::new(
        Address::new("10115")
            .unwrap()
            .with_street("Unter den Linden 5")
            .with_city("Berlin")
            .with_country(CountryCode::new("DE").unwrap()),
    )
    .with_language(LanguageCode::new("de").unwrap())
}

fn item() -> ShipmentItem {
    ShipmentItem::new("Glass vase & stand", 2, 450.0, 3.2)
        .with_customs("70139900", "Decorative glass vase with stand", CountryCode::domestic())
        .with_dimensions(30.0, 20.0, 45.5)
}

#[test]
fn test_destination_with_only_required_fields() {
    let to = ToAddress::new(Address::new("11000").unwrap());
    assert_eq!(
        to.to_wire_format().unwrap(),
        "<to_address><postal_code>11000</postal_code><country_code>CZ</country_code>\
         <residental>1</residental></to_address>"
    );
}

#[test]
fn test_every_request_renders_a_well_formed_document() {
    let quote = QuoteRequest::new(sender(), destination())
        .with_from_address(origin())
        .with_value(900.0)
        .add_item(item());
    let requote = ReQuoteRequest::new(sender(), 7001).with_parcels(vec![Parcel::new(3.5)]);
    let shipment = ShipmentCreationRequest::new(sender(), 12, origin(), destination())
        .with_dispatcher(
            Dispatcher::new(Party::new().with_company_name("Sklárna \"Hlavní\" s.r.o."))
                .with_customs_registration("R-1", "Brno", "CZ530000"),
        )
        .with_recipient(Recipient::new(Party::new().with_person_name("Max <Muster>")))
        .with_reference("Order 2024 15")
        .with_cash_on_delivery(900.0)
        .with_pickup(
            PickupInfo::on(NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()).between(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            ),
        )
        .add_item(item())
        .add_parcel(Parcel::new(3.5).with_dimensions(40.0, 30.0, 50.0));
    let direct = DirectOrder::new(
        Order::new(sender(), 12)
            .add_item(item())
            .with_export_reason(ExportReason::Sample)
            .with_callback_url("https://shop.example/notify?order=15&x=<1>"),
        destination(),
    )
    .unwrap()
    .with_from_address(origin())
    .add_parcel(Parcel::new(3.5));
    let from_quote = QuoteOrder::new(Order::new(sender(), 12).insured(), 7001);

    let documents = [
        quote.to_wire_format().unwrap(),
        requote.to_wire_format().unwrap(),
        shipment.to_wire_format().unwrap(),
        direct.to_wire_format().unwrap(),
        from_quote.to_wire_format().unwrap(),
    ];
    for document in &documents {
        assert!(is_well_formed(document), "not well formed: {}", document);
        assert!(!document.starts_with("<?xml"));
    }
    assert!(documents[0].starts_with("<quote><sender>"));
    assert!(documents[1].starts_with("<requote>"));
    assert!(documents[2].starts_with("<create_shipment>"));
    assert!(documents[3].starts_with("<order>"));
    assert!(documents[4].starts_with("<quote_order>"));
    assert!(documents[2].contains("<person_name>Max &lt;Muster&gt;</person_name>"));
    assert!(documents[2].contains("<date>2024-05-06</date>"));
}

#[test]
fn test_numbers_use_a_decimal_point() {
    let requote = ReQuoteRequest::new(sender(), 1)
        .with_value(1234.5)
        .with_parcels(vec![Parcel::new(0.25)]);
    let out = requote.to_wire_format().unwrap();
    assert!(out.contains("<value>1234.50</value>"));
    assert!(out.contains("<weight>0.25</weight>"));
    assert!(!out.contains("0,25"));
}

#[test]
fn test_operations_follow_the_request_kind() {
    let order = Order::new(sender(), 1);
    assert_eq!(QuoteRequest::new(sender(), destination()).operation(), Operation::Quote);
    assert_eq!(ReQuoteRequest::new(sender(), 1).operation(), Operation::ReQuote);
    assert_eq!(
        ShipmentCreationRequest::new(sender(), 1, origin(), destination()).operation(),
        Operation::CreateShipment
    );
    assert_eq!(
        DirectOrder::new(order.clone(), destination()).unwrap().operation(),
        Operation::Order
    );
    assert_eq!(QuoteOrder::new(order, 1).operation(), Operation::Order);
}

#[test]
fn test_invalid_request_produces_no_output() {
    let mut quote = QuoteRequest::new(sender(), destination()).add_item(ShipmentItem::default());
    let err = quote.to_wire_format().unwrap_err();
    assert!(matches!(err, Error::InvalidEntity("QuoteRequest")));
    assert_eq!(err.to_string(), "QuoteRequest is not valid");

    quote.items = vec![item()];
    assert!(quote.is_valid());
    assert!(quote.to_wire_format().is_ok());
}

#[test]
fn test_nested_violations_name_their_path() {
    let quote = QuoteRequest::new(Sender::new(0, "k"), destination())
        .add_item(ShipmentItem::new("Vase", 1, -1.0, 2.0))
        .add_parcel(Parcel::new(0.0));
    let fields: Vec<String> = quote.violations().into_iter().map(|v| v.field).collect();
    assert_eq!(
        fields,
        vec!["sender.id", "commodities[0].unit_price", "parcels[0].weight"]
    );
}

#[test]
fn test_sender_currency_flows_into_documents() {
    let euro = CurrencyCode::new("EUR").unwrap();
    let quote = QuoteRequest::new(sender().with_currency(euro), destination())
        .add_item(item().with_currency(euro));
    let out = quote.to_wire_format().unwrap();
    assert_eq!(out.matches("<currency>EUR</currency>").count(), 2);
}
