use std::collections::BTreeMap;

use crate::template::TemplateDescriptor;
use crate::template::error::TemplateError;
use crate::template::error::TemplateError::{
    EmptyRegistry, InvalidFontSize, MalformedTemplate, NoGroup, NotFound, UnknownDefaultGroup,
};

type Result<T, E = TemplateError> = std::result::Result<T, E>;

/// Group key reported for the template of a single-template deployment.
pub const DEFAULT_GROUP: &str = "default";
/// Name used to check that subject & body templates compile.
const SAMPLE_NAME: &str = "Jane Doe";

#[derive(Debug)]
pub enum TemplateRegistry {
    /// One template for everybody: the recipient group is ignored.
    Single(TemplateDescriptor),
    Grouped {
        templates: BTreeMap<String, TemplateDescriptor>,
        default_group: Option<String>,
    },
}

impl TemplateRegistry {
    pub fn single(descriptor: TemplateDescriptor) -> Self {
        Self::Single(descriptor)
    }

    pub fn grouped(
        templates: BTreeMap<String, TemplateDescriptor>,
        default_group: Option<String>,
    ) -> Result<Self> {
        if templates.is_empty() {
            return Err(EmptyRegistry);
        }
        if let Some(default_group) = &default_group {
            if !templates.contains_key(default_group) {
                return Err(UnknownDefaultGroup(default_group.clone()));
            }
        }

        Ok(Self::Grouped {
            templates,
            default_group,
        })
    }

    pub fn resolve(&self, group: Option<&str>) -> Result<&TemplateDescriptor> {
        match self {
            TemplateRegistry::Single(descriptor) => Ok(descriptor),
            TemplateRegistry::Grouped {
                templates,
                default_group,
            } => {
                let group = group.or(default_group.as_deref()).ok_or(NoGroup)?;
                templates
                    .get(group)
                    .ok_or_else(|| NotFound(group.to_owned()))
            }
        }
    }

    pub fn descriptors(&self) -> Vec<(&str, &TemplateDescriptor)> {
        match self {
            TemplateRegistry::Single(descriptor) => vec![(DEFAULT_GROUP, descriptor)],
            TemplateRegistry::Grouped { templates, .. } => templates
                .iter()
                .map(|(group, descriptor)| (group.as_str(), descriptor))
                .collect(),
        }
    }

    /// Make sure every subject & body template can be rendered
    /// so that a typo is caught before the first email goes out.
    pub fn validate(&self) -> Result<()> {
        for (group, descriptor) in self.descriptors() {
            if !descriptor.has_usable_font_size() {
                return Err(InvalidFontSize {
                    group: group.to_owned(),
                    size: *descriptor.font_size(),
                });
            }
            let malformed = |field| {
                move |source| MalformedTemplate {
                    group: group.to_owned(),
                    field,
                    source,
                }
            };
            descriptor
                .render_subject(SAMPLE_NAME)
                .map_err(malformed("subject"))?;
            descriptor
                .render_body(SAMPLE_NAME)
                .map_err(malformed("body"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use parameterized::{ide, parameterized};

    use super::*;

    ide!();

    fn descriptor(image: &str) -> TemplateDescriptor {
        TemplateDescriptor::with_image(PathBuf::from(image))
    }

    fn grouped_registry(default_group: Option<&str>) -> TemplateRegistry {
        let templates = BTreeMap::from([
            ("speakers".to_owned(), descriptor("speakers.png")),
            ("attendees".to_owned(), descriptor("attendees.png")),
        ]);
        TemplateRegistry::grouped(templates, default_group.map(str::to_owned)).unwrap()
    }

    #[test]
    fn should_ignore_group_when_single() {
        let registry = TemplateRegistry::single(descriptor("template.png"));

        for group in [None, Some("speakers"), Some("unknown")] {
            let result = registry.resolve(group).unwrap();
            assert_eq!(&PathBuf::from("template.png"), result.image());
        }
    }

    #[test]
    fn should_resolve_group() {
        let registry = grouped_registry(None);

        let result = registry.resolve(Some("speakers")).unwrap();

        assert_eq!(&PathBuf::from("speakers.png"), result.image());
    }

    #[test]
    fn should_fail_to_resolve_unknown_group() {
        let registry = grouped_registry(Some("attendees"));

        let result = registry.resolve(Some("organizers"));

        match result {
            Err(NotFound(group)) => assert_eq!("organizers", group),
            _ => panic!("Unexpected result: {result:?}"),
        }
    }

    #[test]
    fn should_resolve_default_group_when_no_group() {
        let registry = grouped_registry(Some("attendees"));

        let result = registry.resolve(None).unwrap();

        assert_eq!(&PathBuf::from("attendees.png"), result.image());
    }

    #[test]
    fn should_fail_to_resolve_when_no_group_and_no_default() {
        let registry = grouped_registry(None);

        let result = registry.resolve(None);

        assert!(matches!(result, Err(NoGroup)));
    }

    #[test]
    fn should_fail_to_create_with_unknown_default_group() {
        let templates = BTreeMap::from([("speakers".to_owned(), descriptor("speakers.png"))]);

        let result = TemplateRegistry::grouped(templates, Some("attendees".to_owned()));

        assert!(matches!(result, Err(UnknownDefaultGroup(group)) if group == "attendees"));
    }

    #[test]
    fn should_fail_to_create_empty_registry() {
        let result = TemplateRegistry::grouped(BTreeMap::new(), None);

        assert!(matches!(result, Err(EmptyRegistry)));
    }

    #[test]
    fn should_validate_templates() {
        assert!(grouped_registry(None).validate().is_ok());
    }

    #[test]
    fn should_fail_to_validate_malformed_template() {
        let broken = TemplateDescriptor {
            subject: "{% if name %}".to_owned(),
            ..descriptor("broken.png")
        };
        let templates = BTreeMap::from([
            ("speakers".to_owned(), descriptor("speakers.png")),
            ("broken".to_owned(), broken),
        ]);
        let registry = TemplateRegistry::grouped(templates, None).unwrap();

        let result = registry.validate();

        match result {
            Err(MalformedTemplate { group, field, .. }) => {
                assert_eq!("broken", group);
                assert_eq!("subject", field);
            }
            _ => panic!("Unexpected result: {result:?}"),
        }
    }

    #[parameterized(
        font_size = {0.0, -80.0, 1_000_000.0, f32::INFINITY}
    )]
    fn should_fail_to_validate_unusable_font_size(font_size: f32) {
        let unusable = TemplateDescriptor {
            font_size,
            ..descriptor("big.png")
        };
        let registry = TemplateRegistry::single(unusable);

        let result = registry.validate();

        assert!(matches!(result, Err(InvalidFontSize { group, .. }) if group == DEFAULT_GROUP));
    }
}
