use edo_core::{Feature, Location, Region, RngHandle};
use edo_synth::{synthesize_strata, GenerativeParams, GroupDraw};

fn strata_for(seed: u64, regions: &[Region]) -> Vec<edo_synth::Stratum> {
    let mut rng = RngHandle::from_seed(seed);
    synthesize_strata(regions, &GenerativeParams::default(), &mut rng).expect("strata")
}

#[test]
fn same_seed_reproduces_identical_table() {
    let a = strata_for(42, Region::ALL);
    let b = strata_for(42, Region::ALL);
    assert_eq!(a, b);
    assert_eq!(a.len(), 148);

    let c = strata_for(43, Region::ALL);
    assert_ne!(a, c);
}

#[test]
fn region_effect_is_shared_within_region() {
    let strata = strata_for(7, Region::ALL);
    for chunk in strata.chunks(4) {
        let region = chunk[0].key.region;
        let effect = chunk[0].region_effect;
        assert!((-0.5..0.5).contains(&effect));
        for stratum in chunk {
            assert_eq!(stratum.key.region, region);
            assert_eq!(stratum.region_effect.to_bits(), effect.to_bits());
        }
    }
    let distinct: std::collections::BTreeSet<u64> = strata
        .iter()
        .map(|stratum| stratum.region_effect.to_bits())
        .collect();
    assert_eq!(distinct.len(), 37);
}

#[test]
fn features_respect_group_ranges() {
    let params = GenerativeParams::default();
    for seed in 0..8 {
        for stratum in strata_for(seed, &[Region::Lagos, Region::Borno, Region::Kano]) {
            for feature in Feature::ALL {
                let value = stratum.features[feature];
                match &params.feature(feature).expect("params").group {
                    GroupDraw::ByLocation { urban, rural } => {
                        let range = match stratum.key.location {
                            Location::Urban => urban,
                            Location::Rural => rural,
                        };
                        assert!(range.contains(value), "{feature} = {value}");
                    }
                    GroupDraw::Bonus { range, .. } => {
                        assert!(range.contains(value), "{feature} = {value}");
                    }
                }
            }
        }
    }
}

#[test]
fn invalid_region_lists_are_rejected() {
    let mut rng = RngHandle::from_seed(1);
    let params = GenerativeParams::default();
    let err = synthesize_strata(&[], &params, &mut rng).expect_err("empty");
    assert_eq!(err.info().code, "empty-regions");
    let err = synthesize_strata(&[Region::Oyo, Region::Oyo], &params, &mut rng)
        .expect_err("duplicate");
    assert_eq!(err.info().code, "duplicate-region");
}
