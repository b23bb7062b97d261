//! Annotation names that drive graph building and rewriting

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, Declaration, simple_name};

/// Which annotations mark components, injection points and factories, and
/// which annotations the strategies add.
///
/// Names match by simple name, so `Autowired` also matches
/// `org.springframework.beans.factory.annotation.Autowired`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkerConfig {
    pub component: Vec<String>,
    pub injection: Vec<String>,
    pub factory: Vec<String>,
    /// Constructor and factory parameters carrying one of these are not
    /// injection points
    pub excluded_parameter: Vec<String>,
    /// Injection annotation added by rewrites
    pub injection_import: String,
    /// Deferred-initialization annotation added by rewrites
    pub lazy_import: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        fn names(names: &[&str]) -> Vec<String> {
            names.iter().map(|name| name.to_string()).collect()
        }

        Self {
            component: names(&[
                "Component",
                "Service",
                "Repository",
                "Controller",
                "RestController",
                "Configuration",
                "Named",
                "Singleton",
            ]),
            injection: names(&["Autowired", "Inject", "Resource"]),
            factory: names(&["Bean"]),
            excluded_parameter: names(&["Value"]),
            injection_import: "org.springframework.beans.factory.annotation.Autowired".to_string(),
            lazy_import: "org.springframework.context.annotation.Lazy".to_string(),
        }
    }
}

impl MarkerConfig {
    pub fn is_component(&self, declaration: &Declaration) -> bool {
        !declaration.is_interface() && any_marker(&declaration.annotations, &self.component)
    }

    pub fn is_injection(&self, annotations: &[Annotation]) -> bool {
        any_marker(annotations, &self.injection)
    }

    pub fn is_factory(&self, annotations: &[Annotation]) -> bool {
        any_marker(annotations, &self.factory)
    }

    pub fn is_excluded_parameter(&self, annotations: &[Annotation]) -> bool {
        any_marker(annotations, &self.excluded_parameter)
    }

    pub fn is_lazy(&self, annotations: &[Annotation]) -> bool {
        annotations.iter().any(|a| a.matches(&self.lazy_import))
    }

    /// The annotation written for a new injection point
    pub fn injection_annotation(&self) -> Annotation {
        Annotation::new(simple_name(&self.injection_import))
    }

    /// The annotation written to defer initialization
    pub fn lazy_annotation(&self) -> Annotation {
        Annotation::new(simple_name(&self.lazy_import))
    }
}

fn any_marker(annotations: &[Annotation], markers: &[String]) -> bool {
    annotations
        .iter()
        .any(|annotation| markers.iter().any(|marker| annotation.matches(marker)))
}
