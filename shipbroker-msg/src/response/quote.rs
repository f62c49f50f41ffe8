use super::{wrapped_list, Encoding, Payload};
use serde::Deserialize;
use shipbroker_codes::CurrencyCode;

/// One priced carrier product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShippingProduct {
    /// Product id to order with.
    pub id: u64,
    /// Product name.
    pub name: String,
    /// Carrier operating the product.
    pub shipper: String,
    /// Total price.
    pub amount: f64,
    /// Currency of `amount`.
    pub currency: CurrencyCode,
    /// Expected transit time in days.
    #[serde(default)]
    pub delivery_days: Option<u32>,
    /// Delivery goes to a pickup point agent.
    #[serde(default)]
    pub agents_required: bool,
}

wrapped_list!(shipping_products, ShippingProductList, "shipping_product", ShippingProduct);

/// Reply to a quote or re-quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteResult {
    /// Quote to order against.
    pub quote_id: u64,
    /// Offered products in the requested order.
    #[serde(default, deserialize_with = "shipping_products")]
    pub shipping_products: Vec<ShippingProduct>,
}

impl QuoteResult {
    /// Look up an offered product.
    pub fn product(&self, id: u64) -> Option<&ShippingProduct> {
        self.shipping_products.iter().find(|product| product.id == id)
    }

    /// The lowest priced product.
    pub fn cheapest(&self) -> Option<&ShippingProduct> {
        self.shipping_products
            .iter()
            .min_by(|a, b| a.amount.total_cmp(&b.amount))
    }
}

impl Payload for QuoteResult {
    fn parse(body: &str) -> Result<Self, String> {
        Encoding::Markup.decode(body)
    }
}
