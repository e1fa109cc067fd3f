//! Scenario orchestration for the multi-step quote form.

use crate::data::TestDataRecord;
use crate::mapper;
use crate::mapping::FieldMapping;
use crate::pages;
use crate::surface::FormSurface;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// The application under test.
pub const APP_URL: &str = "https://sampleapp.tricentis.com/101/app.php";

const NEXT_INSURANT: &str = "#nextenterinsurantdata";
const NEXT_PRODUCT: &str = "#nextenterproductdata";
const NEXT_PRICE: &str = "#nextselectpriceoption";
const NEXT_QUOTE: &str = "#nextsendquote";
const SEND_EMAIL: &str = "#sendemail";
const CONFIRMATION: &str = "div.sweet-alert";
const CONFIRMATION_OK: &str = "//button[normalize-space()='OK']";
const SUCCESS_TEXT: &str = "Sending e-mail success!";

/// Vehicle tab on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Automobile,
    Truck,
    Motorcycle,
    Camper,
}

impl VehicleType {
    pub fn nav_selector(&self) -> &'static str {
        match self {
            Self::Automobile => "#nav_automobile",
            Self::Truck => "#nav_truck",
            Self::Motorcycle => "#nav_motorcycle",
            Self::Camper => "#nav_camper",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Automobile => "automobile",
            Self::Truck => "truck",
            Self::Motorcycle => "motorcycle",
            Self::Camper => "camper",
        };
        f.write_str(name)
    }
}

impl FromStr for VehicleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automobile" => Ok(Self::Automobile),
            "truck" => Ok(Self::Truck),
            "motorcycle" => Ok(Self::Motorcycle),
            "camper" => Ok(Self::Camper),
            other => Err(Error::Config(format!("invalid vehicle type '{other}'"))),
        }
    }
}

/// Drives one scenario through the five form pages. Holds the page mappings;
/// each method applies one page and advances to the next step.
#[derive(Debug, Clone)]
pub struct QuoteFlow {
    vehicle: FieldMapping,
    insurant: FieldMapping,
    product: FieldMapping,
    price_option: FieldMapping,
    send_quote: FieldMapping,
}

impl Default for QuoteFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteFlow {
    /// Flow over the built-in page mappings.
    pub fn new() -> Self {
        Self {
            vehicle: pages::vehicle_mapping(),
            insurant: pages::insurant_mapping(),
            product: pages::product_mapping(),
            price_option: pages::price_option_mapping(),
            send_quote: pages::send_quote_mapping(),
        }
    }

    /// Replace one page's mapping, matched by page name.
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Result<Self> {
        mapping.validate()?;
        let slot = match mapping.page.as_str() {
            "vehicle" => &mut self.vehicle,
            "insurant" => &mut self.insurant,
            "product" => &mut self.product,
            "price_option" => &mut self.price_option,
            "send_quote" => &mut self.send_quote,
            other => {
                return Err(Error::Config(format!("unknown page '{other}'")));
            }
        };
        *slot = mapping;
        Ok(self)
    }

    /// Open the app and switch to the vehicle tab.
    pub async fn launch<S: FormSurface>(&self, surface: &S, vehicle: VehicleType) -> Result<()> {
        info!("launching quote form for {vehicle}");
        surface
            .goto(APP_URL)
            .await
            .map_err(|e| Error::interaction("navigation", APP_URL, e))?;
        click(surface, "navigation", vehicle.nav_selector()).await
    }

    /// Fill the vehicle data page and advance.
    pub async fn fill_vehicle<S: FormSurface>(
        &self,
        surface: &S,
        record: &TestDataRecord,
    ) -> Result<()> {
        mapper::apply(record, &self.vehicle, surface).await?;
        click(surface, "next", NEXT_INSURANT).await
    }

    /// Fill the insurant data page and advance.
    pub async fn fill_insurant<S: FormSurface>(
        &self,
        surface: &S,
        record: &TestDataRecord,
    ) -> Result<()> {
        mapper::apply(record, &self.insurant, surface).await?;
        click(surface, "next", NEXT_PRODUCT).await
    }

    /// Fill the product data page and advance.
    pub async fn fill_product<S: FormSurface>(
        &self,
        surface: &S,
        record: &TestDataRecord,
    ) -> Result<()> {
        mapper::apply(record, &self.product, surface).await?;
        click(surface, "next", NEXT_PRICE).await
    }

    /// Pick the price tier and advance.
    pub async fn select_price<S: FormSurface>(
        &self,
        surface: &S,
        record: &TestDataRecord,
    ) -> Result<()> {
        mapper::apply(record, &self.price_option, surface).await?;
        click(surface, "next", NEXT_QUOTE).await
    }

    /// Fill the quote contact details and submit.
    pub async fn send_quote<S: FormSurface>(
        &self,
        surface: &S,
        record: &TestDataRecord,
    ) -> Result<()> {
        mapper::apply(record, &self.send_quote, surface).await?;
        click(surface, "submit", SEND_EMAIL).await
    }

    /// Run the whole flow for one record. The record's `VehicleType` field
    /// picks the landing tab.
    pub async fn run<S: FormSurface>(&self, surface: &S, record: &TestDataRecord) -> Result<()> {
        let vehicle = record
            .present("VehicleType")
            .ok_or_else(|| Error::Config("record has no 'VehicleType' field".into()))?
            .parse::<VehicleType>()?;

        self.launch(surface, vehicle).await?;
        self.fill_vehicle(surface, record).await?;
        self.fill_insurant(surface, record).await?;
        self.fill_product(surface, record).await?;
        self.select_price(surface, record).await?;
        self.send_quote(surface, record).await
    }

    /// Assert the submission confirmation appeared, then dismiss it.
    pub async fn confirm_submission<S: FormSurface>(&self, surface: &S) -> Result<()> {
        let text = surface
            .get_text(CONFIRMATION)
            .await
            .map_err(|e| Error::interaction("confirmation", CONFIRMATION, e))?;
        if !text.contains(SUCCESS_TEXT) {
            return Err(Error::AssertionFailed(format!(
                "expected '{SUCCESS_TEXT}' in confirmation, got '{text}'"
            )));
        }
        info!("quote submitted successfully");
        click(surface, "confirmation", CONFIRMATION_OK).await
    }

    /// Focus a field and compare its validation message against the accepted
    /// alternatives. A hidden message is not a failure; the app only renders
    /// it for invalid input.
    pub async fn expect_field_error<S: FormSurface>(
        &self,
        surface: &S,
        field_selector: &str,
        error_selector: &str,
        expected: &[&str],
    ) -> Result<()> {
        surface
            .focus(field_selector)
            .await
            .map_err(|e| Error::interaction("validation", field_selector, e))?;

        let visible = surface
            .is_visible(error_selector)
            .await
            .map_err(|e| Error::interaction("validation", error_selector, e))?;
        if !visible {
            debug!("no validation message visible for {field_selector}");
            return Ok(());
        }

        let text = surface
            .get_text(error_selector)
            .await
            .map_err(|e| Error::interaction("validation", error_selector, e))?;
        if expected.iter().any(|want| text == *want) {
            info!("validation message for {field_selector}: '{text}'");
            Ok(())
        } else {
            Err(Error::AssertionFailed(format!(
                "validation message for {field_selector} was '{text}', expected one of {expected:?}"
            )))
        }
    }
}

async fn click<S: FormSurface>(surface: &S, step: &str, selector: &str) -> Result<()> {
    debug!("click: {selector}");
    surface
        .click(selector)
        .await
        .map_err(|e| Error::interaction(step, selector, e))
}
