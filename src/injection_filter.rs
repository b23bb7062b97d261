//! Injection kind filtering

use crate::graph::InjectionKind;

/// Which kinds of injection points the graph builder records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionFilter {
    exclude_field: bool,
    exclude_setter: bool,
    exclude_constructor: bool,
    exclude_factory: bool,
}

impl InjectionFilter {
    pub fn new(
        exclude_field: bool,
        exclude_setter: bool,
        exclude_constructor: bool,
        exclude_factory: bool,
    ) -> Self {
        Self {
            exclude_field,
            exclude_setter,
            exclude_constructor,
            exclude_factory,
        }
    }

    /// Check if edges of this kind should be recorded
    pub fn includes(&self, kind: InjectionKind) -> bool {
        match kind {
            InjectionKind::Field => !self.exclude_field,
            InjectionKind::Setter => !self.exclude_setter,
            InjectionKind::Constructor => !self.exclude_constructor,
            InjectionKind::FactoryMethod => !self.exclude_factory,
        }
    }
}

impl From<&crate::common::CommonArgs> for InjectionFilter {
    fn from(args: &crate::common::CommonArgs) -> Self {
        Self::new(
            args.exclude_field,
            args.exclude_setter,
            args.exclude_constructor,
            args.exclude_factory,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_includes_everything() {
        let filter = InjectionFilter::default();
        assert!(filter.includes(InjectionKind::Field));
        assert!(filter.includes(InjectionKind::FactoryMethod));
    }

    #[test]
    fn test_excluded_kinds() {
        let filter = InjectionFilter::new(false, true, false, true);
        assert!(filter.includes(InjectionKind::Constructor));
        assert!(!filter.includes(InjectionKind::Setter));
        assert!(!filter.includes(InjectionKind::FactoryMethod));
    }
}
