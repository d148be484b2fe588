use propbox::{
    Property, PropertyBox, PropertySet,
    property::PropertyError,
};

use crate::helpers::Sample;

fn with_display(sample: &Sample) -> (Property<String>, PropertySet) {
    let name = sample.name.clone();
    let seq = sample.seq.clone();
    let display = Property::<String>::virtual_builder()
        .name("display")
        .provider(move |pbox: &PropertyBox| {
            let name = pbox.get_value(&name)?;
            let seq = pbox.get_value(&seq)?;
            Ok(name.map(|n| format!("{n}#{}", seq.unwrap_or_default())))
        })
        .build();
    let set = sample.set().with([display.erased()]);
    (display, set)
}

#[test]
fn test_virtual_value_is_computed_from_box() {
    let sample = Sample::new();
    let (display, set) = with_display(&sample);
    let mut record = PropertyBox::builder(set)
        .set(&sample.name, "item".to_string())
        .set(&sample.seq, 4)
        .build()
        .unwrap();
    assert_eq!(record.get_value(&display).unwrap(), Some("item#4".to_string()));
    assert!(record.contains_value(&display));

    record.set_value(&sample.name, None::<String>).ok();
    // name is required, so the write above was rejected
    assert_eq!(record.get_value(&display).unwrap(), Some("item#4".to_string()));
}

#[test]
fn test_virtual_property_rejects_writes() {
    let sample = Sample::new();
    let (display, set) = with_display(&sample);
    let mut record = PropertyBox::create(set);
    assert!(record.set_value(&display, "x".to_string()).unwrap_err().is_read_only());
    assert!(
        record
            .set_value_ignore_read_only(&display, "x".to_string())
            .unwrap_err()
            .is_read_only()
    );
    assert!(!record.contains_value(&display));
}

#[test]
fn test_missing_provider_is_a_read_error() {
    let orphan = Property::<i64>::virtual_builder().build();
    let record = PropertyBox::create(PropertySet::of([orphan.erased()]));
    let err = record.get_value(&orphan).unwrap_err();
    assert!(err.is_access_error());
    assert!(matches!(
        err,
        propbox::Error::Property(PropertyError::MissingValueProvider { .. })
    ));
}

#[test]
fn test_provider_failure_is_wrapped() {
    let sample = Sample::new();
    let stranger = Property::<i64>::builder("stranger").build();
    let broken = Property::<i64>::virtual_builder()
        .name("broken")
        .provider(move |pbox| pbox.get_value(&stranger))
        .build();
    let record = PropertyBox::create(sample.set().with([broken.erased()]));

    let err = record.get_value(&broken).unwrap_err();
    match err {
        propbox::Error::Property(PropertyError::ValueProvider { property, source }) => {
            assert_eq!(property, "broken");
            assert!(source.is_not_found());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
