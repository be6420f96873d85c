//! Per-field mapping descriptors.
//!
//! A mapped type describes itself once, as a static slice of [`Field`]s in
//! declaration order. Every constructor here is a `const fn`, so the slice
//! lives in a `static` and is shared by all instances.

use crate::error::XmlError;

use super::Mappable;

/// Rewrites a field's default string form before it is written to the tree.
///
/// # Examples
///
/// ```
/// use xmlarbor::mapper::StringTransformer;
/// use xmlarbor::XmlError;
///
/// struct AddPercentage;
///
/// impl StringTransformer for AddPercentage {
///     fn transform(&self, input: &str) -> Result<String, XmlError> {
///         Ok(format!("{input}%"))
///     }
/// }
///
/// assert_eq!(AddPercentage.transform("20").unwrap(), "20%");
/// ```
pub trait StringTransformer: Sync {
    /// Returns the transformed string.
    ///
    /// # Errors
    ///
    /// Any error is propagated out of the mapping call unchanged.
    fn transform(&self, input: &str) -> Result<String, XmlError>;
}

/// Where a field ends up in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// An attribute on the current entity. `None` uses the field name.
    Attribute {
        /// Attribute name override.
        name: Option<&'static str>,
    },
    /// A child entity of the current entity. `None` uses the field name.
    Entity {
        /// Entity name override.
        name: Option<&'static str>,
    },
    /// The field is not mapped.
    Excluded,
}

/// The value read from a field.
pub enum FieldValue<'a> {
    /// A single value in its default string form.
    Scalar(String),
    /// An ordered container of mappable items.
    List(Vec<&'a dyn Mappable>),
}

impl<'a> FieldValue<'a> {
    /// Builds a scalar from anything with a string form.
    pub fn scalar(value: impl ToString) -> Self {
        Self::Scalar(value.to_string())
    }

    /// Builds a list from a slice of mappable items.
    pub fn items<M: Mappable>(items: &'a [M]) -> Self {
        Self::List(items.iter().map(|item| item as &dyn Mappable).collect())
    }
}

/// Reads a field from an object.
///
/// `Ok(None)` means the value is absent; an error means it could not be
/// read. The mapper skips the field in both cases.
pub type Accessor<T> = for<'a> fn(&'a T) -> Result<Option<FieldValue<'a>>, XmlError>;

/// One field of a mapped type.
pub struct Field<T: 'static> {
    name: &'static str,
    directive: Directive,
    transformer: Option<&'static dyn StringTransformer>,
    accessor: Option<Accessor<T>>,
}

impl<T: 'static> Field<T> {
    /// A field mapped to an attribute named after the field.
    #[must_use]
    pub const fn attribute(name: &'static str, accessor: Accessor<T>) -> Self {
        Self {
            name,
            directive: Directive::Attribute { name: None },
            transformer: None,
            accessor: Some(accessor),
        }
    }

    /// A field mapped to a child entity named after the field.
    #[must_use]
    pub const fn entity(name: &'static str, accessor: Accessor<T>) -> Self {
        Self {
            name,
            directive: Directive::Entity { name: None },
            transformer: None,
            accessor: Some(accessor),
        }
    }

    /// A field that is never mapped.
    #[must_use]
    pub const fn excluded(name: &'static str) -> Self {
        Self {
            name,
            directive: Directive::Excluded,
            transformer: None,
            accessor: None,
        }
    }

    /// Overrides the attribute or entity name. No effect on excluded fields.
    #[must_use]
    pub const fn named(mut self, target: &'static str) -> Self {
        self.directive = match self.directive {
            Directive::Attribute { .. } => Directive::Attribute { name: Some(target) },
            Directive::Entity { .. } => Directive::Entity { name: Some(target) },
            Directive::Excluded => Directive::Excluded,
        };
        self
    }

    /// Runs values through `transformer` before they are written. A list's
    /// transformed string form is discarded, but its errors are not.
    #[must_use]
    pub const fn transform(mut self, transformer: &'static dyn StringTransformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Returns the field's own name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's directive.
    #[must_use]
    pub fn directive(&self) -> Directive {
        self.directive
    }

    /// Returns the name written to the tree: the directive's override, else
    /// the field name.
    #[must_use]
    pub fn target_name(&self) -> &'static str {
        match self.directive {
            Directive::Attribute { name } | Directive::Entity { name } => name.unwrap_or(self.name),
            Directive::Excluded => self.name,
        }
    }

    pub(crate) fn read<'a>(&self, obj: &'a T) -> Option<Result<Option<FieldValue<'a>>, XmlError>> {
        self.accessor.map(|read| read(obj))
    }

    pub(crate) fn has_transformer(&self) -> bool {
        self.transformer.is_some()
    }

    pub(crate) fn apply_transform(&self, value: String) -> Result<String, XmlError> {
        match self.transformer {
            Some(transformer) => transformer.transform(&value),
            None => Ok(value),
        }
    }
}
