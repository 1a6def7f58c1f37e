use edo_core::{CleaningRule, Feature, FeatureVector, Location, Region, Sex, StratumKey};

#[test]
fn catalog_names_parse_back() {
    for feature in Feature::ALL {
        assert_eq!(feature.name().parse::<Feature>().expect("parse"), feature);
        assert_eq!(Feature::ALL[feature.index()], feature);
    }
    assert!("literacy_outcome".parse::<Feature>().is_err());
}

#[test]
fn serde_names_match_column_names() {
    for feature in Feature::ALL {
        let json = serde_json::to_string(&feature).expect("serialize");
        assert_eq!(json, format!("\"{}\"", feature.name()));
    }
}

#[test]
fn cleaning_rules_cover_catalog() {
    let percentages = Feature::ALL
        .iter()
        .filter(|f| f.cleaning_rule() == CleaningRule::Percentage)
        .count();
    assert_eq!(percentages, 5);
    assert_eq!(
        Feature::TextbookAvailabilityIndex.cleaning_rule(),
        CleaningRule::UnitIndex
    );
    assert_eq!(CleaningRule::NonNegative.domain().max, f64::INFINITY);
}

#[test]
fn feature_vector_indexes_by_feature() {
    let mut vector = FeatureVector::from_fn(|feature| feature.index() as f64);
    assert_eq!(vector[Feature::HouseholdSize], 5.0);
    vector[Feature::HouseholdSize] = 7.5;
    assert_eq!(vector.as_array()[5], 7.5);
    assert_eq!(vector.iter().count(), Feature::ALL.len());
}

#[test]
fn regions_form_closed_set() {
    assert_eq!(Region::ALL.len(), 37);
    assert_eq!("Akwa Ibom".parse::<Region>().expect("region"), Region::AkwaIbom);
    assert_eq!("FCT Abuja".parse::<Region>().expect("region"), Region::FctAbuja);
    let err = "Atlantis".parse::<Region>().expect_err("unknown region");
    assert_eq!(err.info().code, "unknown-category");
    assert_eq!(
        serde_json::to_string(&Region::CrossRiver).expect("json"),
        "\"Cross River\""
    );
}

#[test]
fn stratum_keys_enumerate_in_draw_order() {
    let keys = StratumKey::enumerate(&[Region::Lagos, Region::Kano]);
    assert_eq!(keys.len(), 8);
    assert_eq!(keys[0], StratumKey::new(Region::Lagos, Sex::Male, Location::Urban));
    assert_eq!(keys[1], StratumKey::new(Region::Lagos, Sex::Male, Location::Rural));
    assert_eq!(keys[2], StratumKey::new(Region::Lagos, Sex::Female, Location::Urban));
    assert_eq!(keys[4].region, Region::Kano);
    assert!("X".parse::<Sex>().is_err());
    assert!("suburban".parse::<Location>().is_err());
}
