//! Built-in field mappings for the five pages of the sample insurance
//! quote form.

use crate::mapping::{FieldMapping, FieldSpec};

/// Label selector shared by checkbox groups and labeled radio pairs.
const LABEL_TEMPLATE: &str = "//label[normalize-space()='${value}']";

/// Page 1: vehicle data.
pub fn vehicle_mapping() -> FieldMapping {
    FieldMapping::new(
        "vehicle",
        vec![
            FieldSpec::select_by_value("Make", "#make"),
            FieldSpec::select_by_value("Model", "#model"),
            FieldSpec::text("CylinderCapacity", "#cylindercapacity"),
            FieldSpec::text("EnginePerformance", "#engineperformance"),
            FieldSpec::text("DateOfManufacture", "#dateofmanufacture"),
            // Automobile and motorcycle variants share the seat count field.
            FieldSpec::select_by_label("Seats", "#numberofseats, #numberofseatsmotorcycle"),
            FieldSpec::radio_exclusive("RightHand", LABEL_TEMPLATE, "Yes", "No"),
            FieldSpec::select_by_value("Fuel", "#fuel"),
            FieldSpec::text("Payload", "//input[@id='payload']"),
            FieldSpec::text("Weight", "//input[@id='totalweight']"),
            FieldSpec::text("ListPrice", "//input[@id='listprice']"),
            FieldSpec::text("LicensePlateNumber", "//input[@id='licenseplatenumber']"),
            FieldSpec::text("AnnualMileage", "//input[@id='annualmileage']"),
        ],
    )
}

/// Page 2: insurant data.
pub fn insurant_mapping() -> FieldMapping {
    FieldMapping::new(
        "insurant",
        vec![
            FieldSpec::text("FirstName", "#firstname"),
            FieldSpec::text("LastName", "#lastname"),
            FieldSpec::text("BirthDate", "#birthdate"),
            FieldSpec::radio_exclusive("Gender", LABEL_TEMPLATE, "Male", "Female"),
            FieldSpec::text("Street", "#streetaddress"),
            FieldSpec::select_by_value("Country", "#country"),
            FieldSpec::text("Zip", "#zipcode"),
            FieldSpec::text("City", "#city"),
            FieldSpec::select_by_value("Occupation", "#occupation"),
            FieldSpec::checkbox_group("Hobbies", LABEL_TEMPLATE),
            FieldSpec::text("Website", "#website"),
        ],
    )
}

/// Page 3: product data.
pub fn product_mapping() -> FieldMapping {
    FieldMapping::new(
        "product",
        vec![
            FieldSpec::text("StartDate", "#startdate"),
            FieldSpec::select_by_value("InsuranceSum", "#insurancesum"),
            FieldSpec::select_by_value("MeritRating", "#meritrating"),
            FieldSpec::select_by_value("DamageInsurance", "#damageinsurance"),
            FieldSpec::checkbox_group("OptionalProduct", LABEL_TEMPLATE),
            FieldSpec::select_by_value("CourtesyCar", "#courtesycar"),
        ],
    )
}

/// Page 4: price option. The tiers map to the nth styled radio in the table.
pub fn price_option_mapping() -> FieldMapping {
    FieldMapping::new(
        "price_option",
        vec![FieldSpec::radio_indexed(
            "PriceOption",
            "(//span[@class='ideal-radio'])[${index}]",
            [("silver", 2), ("gold", 3), ("platinum", 4), ("ultimate", 5)],
        )],
    )
}

/// Page 5: send quote.
pub fn send_quote_mapping() -> FieldMapping {
    FieldMapping::new(
        "send_quote",
        vec![
            FieldSpec::text("Email", "#email"),
            FieldSpec::text("Phone", "#phone"),
            FieldSpec::text("Username", "#username"),
            FieldSpec::text("Password", "#password"),
            FieldSpec::text("ConfirmPassword", "#confirmpassword"),
            FieldSpec::text("Comments", "#Comments"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_mappings_validate() {
        for mapping in [
            vehicle_mapping(),
            insurant_mapping(),
            product_mapping(),
            price_option_mapping(),
            send_quote_mapping(),
        ] {
            mapping.validate().unwrap_or_else(|e| {
                panic!("mapping '{}' failed validation: {e}", mapping.page)
            });
        }
    }

    #[test]
    fn test_price_tiers() {
        let mapping = price_option_mapping();
        let crate::mapping::ControlKind::RadioIndexed(ref spec) = mapping.fields[0].kind else {
            panic!("expected radio_indexed");
        };
        assert_eq!(spec.position_of("silver"), Some(2));
        assert_eq!(spec.position_of("Ultimate"), Some(5));
    }
}
