//! Element type to extraction routine registry
//!
//! A registry is filled once and then only read. The built-in registry is a
//! process-wide static covering every `ElementType`; custom registries can be
//! built for restricted or extended type sets and shared by reference.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;

use crate::raster::{Element, ElementType};
use crate::scan::errors::{ScanError, ScanResult};

use super::routine::{ExtractionRoutine, NonZeroRoutine};

lazy_static! {
    static ref BUILTIN_REGISTRY: ExtractionRegistry = ExtractionRegistry::with_builtin_routines();
}

/// Registry with a non-zero routine for every built-in element type
pub fn builtin_registry() -> &'static ExtractionRegistry {
    &BUILTIN_REGISTRY
}

/// Maps element types to the routines that read them
#[derive(Default)]
pub struct ExtractionRegistry {
    routines: HashMap<ElementType, Box<dyn ExtractionRoutine>>,
}

impl ExtractionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the non-zero routine for all eight element types
    pub fn with_builtin_routines() -> Self {
        let mut registry = Self::new();
        registry.insert_builtin::<u8>();
        registry.insert_builtin::<i8>();
        registry.insert_builtin::<u16>();
        registry.insert_builtin::<i16>();
        registry.insert_builtin::<u32>();
        registry.insert_builtin::<i32>();
        registry.insert_builtin::<f32>();
        registry.insert_builtin::<f64>();
        registry
    }

    fn insert_builtin<T: Element>(&mut self) {
        self.routines.insert(T::ELEMENT_TYPE, Box::new(NonZeroRoutine::<T>::new()));
    }

    /// Register a routine for an element type
    ///
    /// # Returns
    /// `DuplicateRegistration` if the type already has a routine, or an
    /// error if the routine reads a different type than the key
    pub fn register(&mut self, element_type: ElementType, routine: Box<dyn ExtractionRoutine>) -> ScanResult<()> {
        if routine.element_type() != element_type {
            return Err(ScanError::ElementTypeMismatch {
                expected: element_type,
                actual: routine.element_type(),
            });
        }
        if self.routines.contains_key(&element_type) {
            return Err(ScanError::DuplicateRegistration(element_type));
        }

        debug!("Registering {} routine for {}", routine.name(), element_type);
        self.routines.insert(element_type, routine);
        Ok(())
    }

    /// Register the non-zero routine for `T`
    pub fn register_element<T: Element>(&mut self) -> ScanResult<()> {
        self.register(T::ELEMENT_TYPE, Box::new(NonZeroRoutine::<T>::new()))
    }

    /// Routine for an exact element type match
    pub fn lookup(&self, element_type: ElementType) -> ScanResult<&dyn ExtractionRoutine> {
        self.routines
            .get(&element_type)
            .map(|routine| routine.as_ref())
            .ok_or(ScanError::UnsupportedElementType(element_type))
    }

    pub fn supports(&self, element_type: ElementType) -> bool {
        self.routines.contains_key(&element_type)
    }

    /// Registered element types in declaration order
    pub fn element_types(&self) -> Vec<ElementType> {
        ElementType::ALL
            .iter()
            .copied()
            .filter(|t| self.supports(*t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}
