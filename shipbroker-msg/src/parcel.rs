//! Physical packages.

use crate::validation::{RuleViolation, Rules, Validate};
use crate::wire::{WireEntity, WireWriter};

/// One package handed to the carrier.
#[derive(Debug, Clone, PartialEq)]
pub struct Parcel {
    weight: f64,
    /// Length in centimetres.
    pub length: Option<f64>,
    /// Width in centimetres.
    pub width: Option<f64>,
    /// Height in centimetres.
    pub height: Option<f64>,
}

impl Parcel {
    /// Create a parcel of `weight` kilograms.
    pub fn new(weight: f64) -> Self {
        Self {
            weight,
            length: None,
            width: None,
            height: None,
        }
    }

    /// Set the dimensions in centimetres.
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Weight in kilograms.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Validate for Parcel {
    fn violations(&self) -> Vec<RuleViolation> {
        Rules::new()
            .positive("weight", self.weight)
            .opt_positive("length", self.length)
            .opt_positive("width", self.width)
            .opt_positive("height", self.height)
            .finish()
    }
}

impl WireEntity for Parcel {
    const ENTITY_NAME: &'static str = "Parcel";

    fn write_wire(&self, writer: &mut WireWriter) {
        writer.element("parcel", |w| {
            w.number("weight", self.weight)
                .opt_number("length", self.length)
                .opt_number("width", self.width)
                .opt_number("height", self.height);
        });
    }
}
