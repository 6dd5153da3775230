use crate::raster::{ElementType, RasterView};
use crate::scan::{
    builtin_registry, ExtractionRegistry, ExtractionRoutine, NonZeroRoutine, RegionSamples, ScanError,
    ScanResult,
};

#[test]
fn test_builtin_registry_covers_all_types() {
    let registry = builtin_registry();
    assert_eq!(registry.len(), ElementType::ALL.len());
    assert_eq!(registry.element_types(), ElementType::ALL.to_vec());

    for element_type in ElementType::ALL {
        let routine = registry.lookup(element_type).unwrap();
        assert_eq!(routine.element_type(), element_type);
    }
}

#[test]
fn test_empty_registry_lookup_fails() {
    let registry = ExtractionRegistry::new();
    assert!(registry.is_empty());
    assert!(!registry.supports(ElementType::F64));
    assert!(matches!(
        registry.lookup(ElementType::F64),
        Err(ScanError::UnsupportedElementType(ElementType::F64))
    ));
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = ExtractionRegistry::new();
    registry.register_element::<i32>().unwrap();

    let error = registry.register_element::<i32>().unwrap_err();
    assert!(matches!(error, ScanError::DuplicateRegistration(ElementType::I32)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_rejects_routine_for_other_type() {
    let mut registry = ExtractionRegistry::new();
    let result = registry.register(ElementType::U8, Box::new(NonZeroRoutine::<u16>::new()));

    assert!(matches!(
        result,
        Err(ScanError::ElementTypeMismatch { expected: ElementType::U8, actual: ElementType::U16 })
    ));
    assert!(registry.is_empty());
}

struct NamedRoutine;

impl ExtractionRoutine for NamedRoutine {
    fn extract(&self, _view: &RasterView<'_>) -> ScanResult<RegionSamples> {
        Ok(RegionSamples::empty(ElementType::I8))
    }

    fn element_type(&self) -> ElementType {
        ElementType::I8
    }

    fn name(&self) -> &'static str {
        "named"
    }
}

#[test]
fn test_custom_routine_lookup() {
    let mut registry = ExtractionRegistry::new();
    registry.register(ElementType::I8, Box::new(NamedRoutine)).unwrap();
    registry.register_element::<f32>().unwrap();

    assert_eq!(registry.lookup(ElementType::I8).unwrap().name(), "named");
    assert_eq!(registry.lookup(ElementType::F32).unwrap().name(), "non-zero");
    assert_eq!(registry.element_types(), vec![ElementType::I8, ElementType::F32]);
}
