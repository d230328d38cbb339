//! The three-step farm details wizard.

use crate::location::{default_resolver, LocationResolver};

use super::engine::FormWizardEngine;
use super::field::{FieldDescriptor, FieldKind, FormDescriptor, StepperField, Validator};

pub const SOIL_TYPES: &[&str] = &["Black", "Red", "Alluvial", "Laterite", "Sandy", "Clay", "Loamy"];
pub const WATER_SOURCES: &[&str] = &["Well", "Borewell", "Canal", "River", "Rainwater"];
pub const IRRIGATION_TYPES: &[&str] = &["Drip", "Sprinkler", "Flood", "Manual"];
pub const SEASONS: &[&str] = &["Kharif", "Rabi", "Zaid"];

pub const STATE: &str = "state";
pub const DISTRICT: &str = "district";
pub const FARM_SIZE: &str = "farmSize";
pub const SOIL_TYPE: &str = "soilType";
pub const SOIL_PH: &str = "soilPh";
pub const NITROGEN: &str = "nitrogen";
pub const PHOSPHORUS: &str = "phosphorus";
pub const POTASSIUM: &str = "potassium";
pub const RAINFALL: &str = "rainfall";
pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const WATER_SOURCE: &str = "waterSource";
pub const IRRIGATION_TYPE: &str = "irrigationType";
pub const SEASON: &str = "season";
pub const PREVIOUS_CROP: &str = "previousCrop";
pub const BUDGET: &str = "budget";
pub const LABOR_COUNT: &str = "laborCount";
pub const ORGANIC_PREFERENCE: &str = "organicPreference";
pub const SUNLIGHT_HOURS: &str = "sunlightHours";
pub const ELEVATION: &str = "elevation";

fn choice(options: &[&str]) -> FieldKind {
    FieldKind::Choice(options.iter().map(|option| option.to_string()).collect())
}

fn canonical_region_validator(resolver: &LocationResolver) -> Validator {
    let names: Vec<String> = resolver.canonical_names().map(str::to_string).collect();
    Validator::custom(move |input| {
        if names.iter().any(|name| name == input) {
            Ok(())
        } else {
            Err(format!("`{}` is not a recognised state or union territory", input))
        }
    })
}

/// Descriptor for the farm details wizard over the built-in Indian regions.
pub fn farm_details_form() -> FormDescriptor {
    farm_details_form_for(default_resolver())
}

/// Farm details wizard whose state field accepts the canonical names of
/// `resolver`. Defaults follow the mobile app.
pub fn farm_details_form_for(resolver: &LocationResolver) -> FormDescriptor {
    let fields = vec![
        FieldDescriptor::new(STATE, "State", 1, FieldKind::Text)
            .with_validator(canonical_region_validator(resolver))
            .with_help("State or union territory, e.g. Maharashtra."),
        FieldDescriptor::new(DISTRICT, "District", 1, FieldKind::Text).with_help("e.g. Pune"),
        FieldDescriptor::new(FARM_SIZE, "Farm Size (Acres)", 1, FieldKind::Number)
            .with_help("e.g. 2.5"),
        FieldDescriptor::new(SOIL_TYPE, "Soil Type", 1, choice(SOIL_TYPES)).with_required(),
        FieldDescriptor::new(
            SOIL_PH,
            "Soil pH",
            1,
            FieldKind::Stepper(StepperField::new(4.0, 9.0, 0.5)),
        ),
        FieldDescriptor::new(NITROGEN, "Nitrogen (kg/ha)", 2, FieldKind::Number)
            .with_help("e.g. 150"),
        FieldDescriptor::new(PHOSPHORUS, "Phosphorus (kg/ha)", 2, FieldKind::Number)
            .with_help("e.g. 40"),
        FieldDescriptor::new(POTASSIUM, "Potassium (kg/ha)", 2, FieldKind::Number)
            .with_help("e.g. 80"),
        FieldDescriptor::new(RAINFALL, "Annual Rainfall (mm)", 2, FieldKind::Number)
            .with_help("e.g. 800"),
        FieldDescriptor::new(TEMPERATURE, "Temperature (°C)", 2, FieldKind::Number)
            .with_help("e.g. 28"),
        FieldDescriptor::new(HUMIDITY, "Humidity (%)", 2, FieldKind::Number).with_help("e.g. 60"),
        FieldDescriptor::new(WATER_SOURCE, "Water Source", 2, choice(WATER_SOURCES))
            .with_required(),
        FieldDescriptor::new(IRRIGATION_TYPE, "Irrigation Type", 2, choice(IRRIGATION_TYPES))
            .with_required(),
        FieldDescriptor::new(SEASON, "Current Season", 3, choice(SEASONS)).with_required(),
        FieldDescriptor::new(PREVIOUS_CROP, "Previous Crop", 3, FieldKind::Text)
            .with_help("e.g. Wheat"),
        FieldDescriptor::new(BUDGET, "Budget (₹)", 3, FieldKind::Number).with_help("e.g. 50000"),
        FieldDescriptor::new(LABOR_COUNT, "Labor Count", 3, FieldKind::Number),
        FieldDescriptor::new(ORGANIC_PREFERENCE, "Prefer Organic Farming", 3, FieldKind::Toggle),
        FieldDescriptor::new(
            SUNLIGHT_HOURS,
            "Sunlight (hours/day)",
            3,
            FieldKind::Stepper(StepperField::new(0.0, 24.0, 0.5)),
        ),
        FieldDescriptor::new(ELEVATION, "Elevation (m)", 3, FieldKind::Number),
    ];

    FormDescriptor::new(
        "farm-details",
        vec!["Location & Land", "Soil & Water", "Budget & Preferences"],
        fields,
    )
    .with_default(STATE, "Maharashtra")
    .with_default(SOIL_TYPE, "Black")
    .with_default(SOIL_PH, "6.5")
    .with_default(WATER_SOURCE, "Well")
    .with_default(IRRIGATION_TYPE, "Drip")
    .with_default(SEASON, "Kharif")
    .with_default(ORGANIC_PREFERENCE, true)
    .with_default(SUNLIGHT_HOURS, "7")
}

/// Pre-fills the state field from a geocoder region string.
///
/// Returns the canonical name when the hint resolves; an unresolvable hint
/// clears the field so the farmer enters it by hand.
pub fn apply_location_hint(
    engine: &mut FormWizardEngine,
    resolver: &LocationResolver,
    hint: Option<&str>,
) -> Option<String> {
    let hint = hint.filter(|hint| !hint.trim().is_empty())?;
    match resolver.resolve(Some(hint)) {
        Some(state) => {
            let state = state.to_string();
            engine.update_field(STATE, state.clone());
            Some(state)
        }
        None => {
            engine.update_field(STATE, "");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::FieldValue;

    fn engine() -> FormWizardEngine {
        FormWizardEngine::new(farm_details_form()).unwrap()
    }

    #[test]
    fn form_has_three_steps_and_all_fields() {
        let form = farm_details_form();
        assert_eq!(form.total_steps(), 3);
        assert_eq!(form.fields.len(), 20);
        assert_eq!(form.fields_for_step(1).count(), 5);
        assert_eq!(form.fields_for_step(2).count(), 8);
        assert_eq!(form.fields_for_step(3).count(), 7);
    }

    #[test]
    fn defaults_match_the_mobile_form() {
        let engine = engine();
        assert_eq!(engine.text(STATE), Some("Maharashtra"));
        assert_eq!(engine.text(SOIL_PH), Some("6.5"));
        assert_eq!(engine.text(SUNLIGHT_HOURS), Some("7"));
        assert_eq!(engine.value(ORGANIC_PREFERENCE), Some(&FieldValue::Flag(true)));
        assert_eq!(engine.text(BUDGET), Some(""));
        assert_eq!(engine.fields().len(), 20);
    }

    #[test]
    fn default_form_validates_on_every_step() {
        let engine = engine();
        for step in 1..=3 {
            assert!(engine.validate_step(step).is_ok(), "step {} failed", step);
        }
    }

    #[test]
    fn state_must_be_canonical_or_empty() {
        let mut engine = engine();
        engine.update_field(STATE, "Pune");
        let errors = engine.validate_step(1).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, STATE);

        engine.update_field(STATE, "");
        assert!(engine.validate_step(1).is_ok());
    }

    #[test]
    fn choice_fields_reject_unknown_options() {
        let mut engine = engine();
        engine.update_field(SOIL_TYPE, "Volcanic");
        engine.update_field(SEASON, "Monsoon");
        assert!(engine.validate_step(1).is_err());
        assert!(engine.validate_step(3).is_err());
    }

    #[test]
    fn choice_fields_must_hold_an_option() {
        let mut engine = engine();
        engine.update_field(WATER_SOURCE, "");
        let errors = engine.validate_step(2).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, WATER_SOURCE);
        assert_eq!(errors[0].message, "Water Source is required");
    }

    #[test]
    fn state_validator_follows_the_resolver_tables() {
        let resolver = LocationResolver::with_tables(
            ["North Province", "South Province"],
            [("N", "North Province")],
        )
        .unwrap();
        let mut engine = FormWizardEngine::new(farm_details_form_for(&resolver)).unwrap();
        // Maharashtra is the built-in default and unknown to these tables.
        assert!(engine.validate_step(1).is_err());

        let state = apply_location_hint(&mut engine, &resolver, Some("N"));
        assert_eq!(state.as_deref(), Some("North Province"));
        assert!(engine.validate_step(1).is_ok());
    }

    #[test]
    fn soil_ph_is_clamped_to_agronomic_range() {
        let mut engine = engine();
        engine.handle_text_change(SOIL_PH, "15").unwrap();
        assert_eq!(engine.text(SOIL_PH), Some("9"));
        engine.handle_text_change(SOIL_PH, "2").unwrap();
        assert_eq!(engine.text(SOIL_PH), Some("4"));
    }

    #[test]
    fn location_hint_prefills_state() {
        let mut engine = engine();
        let resolved = apply_location_hint(&mut engine, default_resolver(), Some("ಕರ್ನಾಟಕ"));
        assert_eq!(resolved.as_deref(), Some("Karnataka"));
        assert_eq!(engine.text(STATE), Some("Karnataka"));
    }

    #[test]
    fn unresolved_hint_clears_state_and_blank_hint_is_ignored() {
        let mut engine = engine();
        assert_eq!(apply_location_hint(&mut engine, default_resolver(), Some("  ")), None);
        assert_eq!(engine.text(STATE), Some("Maharashtra"));

        assert_eq!(
            apply_location_hint(&mut engine, default_resolver(), Some("Atlantis")),
            None
        );
        assert_eq!(engine.text(STATE), Some(""));
    }
}
